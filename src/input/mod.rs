pub mod detect;
pub mod docking_csv;

use std::path::{Path, PathBuf};
use std::{fmt, io};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("input directory not found: {0}")]
    MissingDir(PathBuf),
    #[error("no protein CSV files in {0}")]
    NoProteinFiles(PathBuf),
    #[error("{file}: missing required column: {column}")]
    MissingColumn { file: String, column: String },
    #[error("{file}: invalid {field} at line {line}: {value:?}")]
    InvalidField {
        file: String,
        line: u64,
        field: String,
        value: String,
    },
    #[error("{file}: duplicate conformation {conformation} at line {line}")]
    DuplicateRow {
        file: String,
        line: u64,
        conformation: String,
    },
    #[error("protein {0} is provided by more than one file")]
    DuplicateProtein(String),
    #[error("unsupported gzip input without feature enabled: {0}")]
    GzipNotEnabled(PathBuf),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub fn open_reader(path: &Path) -> Result<Box<dyn io::BufRead>, InputError> {
    let file = std::fs::File::open(path)?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        #[cfg(feature = "gz")]
        {
            let decoder = flate2::read::GzDecoder::new(file);
            return Ok(Box::new(io::BufReader::new(decoder)));
        }
        #[cfg(not(feature = "gz"))]
        {
            return Err(InputError::GzipNotEnabled(path.to_path_buf()));
        }
    }
    Ok(Box::new(io::BufReader::new(file)))
}

pub fn path_display(path: &Path) -> impl fmt::Display + '_ {
    path.to_string_lossy()
}
