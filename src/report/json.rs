use std::path::Path;

use crate::pipeline::stage6_report::FinalSummary;

pub const SUMMARY_FILE: &str = "summary.json";

pub fn write_summary(out_dir: &Path, summary: &FinalSummary) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(out_dir.join(SUMMARY_FILE), json).map_err(serde_json::Error::io)?;
    Ok(())
}
