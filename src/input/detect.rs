use std::path::{Path, PathBuf};

use crate::input::InputError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinFile {
    pub protein_name: String,
    pub path: PathBuf,
}

/// Protein name for a result file: the file name without `.csv` / `.csv.gz`.
pub fn protein_name_from_path(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    let lower = name.to_ascii_lowercase();
    let stem_len = if lower.ends_with(".csv.gz") {
        name.len() - ".csv.gz".len()
    } else if lower.ends_with(".csv") {
        name.len() - ".csv".len()
    } else {
        return None;
    };
    if stem_len == 0 {
        return None;
    }
    Some(name[..stem_len].to_string())
}

pub fn list_protein_files(dir: &Path) -> Result<Vec<ProteinFile>, InputError> {
    if !dir.is_dir() {
        return Err(InputError::MissingDir(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(protein_name) = protein_name_from_path(&path) {
            files.push(ProteinFile { protein_name, path });
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));

    if files.is_empty() {
        return Err(InputError::NoProteinFiles(dir.to_path_buf()));
    }
    Ok(files)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/detect.rs"]
mod tests;
