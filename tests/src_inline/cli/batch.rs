use super::*;
use crate::config::loader::parse_batch_file;
use std::fs;
use tempfile::tempdir;

const HEADER: &str =
    "title,i_i_glide_lignum,r_i_docking_score,r_i_glide_gscore,r_i_glide_emodel,r_i_glide_energy";

fn input_dir(dir: &Path) {
    fs::write(
        dir.join("P1.csv"),
        format!("{HEADER}\n1,1,-8,-7,-60,-40\n2,1,-5,-4,-30,-20\n"),
    )
    .expect("write csv");
    fs::write(
        dir.join("P2.csv"),
        format!("{HEADER}\n1,1,-6,-6,-50,-30\n2,1,-9,-8,-70,-45\n"),
    )
    .expect("write csv");
}

#[test]
fn failing_configuration_does_not_stop_others() {
    let input = tempdir().expect("tempdir");
    input_dir(input.path());
    let out = tempdir().expect("tempdir");
    let batch = parse_batch_file(
        r#"
[[configuration]]
name = "baseline"

[[configuration]]
name = "bad_top_level"
[configuration.top_level]
docking = 0.9
energy = 0.9
optional = 0.0

[[configuration]]
name = "zscore"
normalization = "z-score"
"#,
    )
    .expect("batch");

    let results = run_batch(&batch.configurations, input.path(), out.path(), &CancelToken::new());
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].name, "baseline");
    assert_eq!(
        results[0].outcome,
        Ok(BatchCounts {
            conformations: 2,
            proteins: 2
        })
    );
    assert!(results[1].outcome.is_err());
    assert!(results[2].outcome.is_ok());
    assert!(out.path().join("baseline/conformation_ranking.tsv").exists());
    assert!(out.path().join("zscore/summary.json").exists());
    assert!(!out.path().join("bad_top_level").exists());

    let report = render_batch_report(&results);
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "name\tstatus\telapsed_ms\tconformations\tproteins\terror");
    assert!(lines[1].starts_with("baseline\tok\t"));
    assert!(lines[2].starts_with("bad_top_level\tfailed\t"));
    assert!(!lines[2].ends_with('\t'));
}

#[test]
fn entry_input_overrides_default_directory() {
    let input = tempdir().expect("tempdir");
    input_dir(input.path());
    let empty = tempdir().expect("tempdir");
    let out = tempdir().expect("tempdir");
    let text = format!(
        "[[configuration]]\nname = \"own_input\"\ninput = {:?}\n",
        input.path().to_string_lossy()
    );
    let batch = parse_batch_file(&text).expect("batch");
    let results = run_batch(&batch.configurations, empty.path(), out.path(), &CancelToken::new());
    assert!(results[0].outcome.is_ok());
}
