//! Report export: write finished runs to JSON for external tooling.
//!
//! The simulation never formats or plots anything itself; reporting and
//! plotting tools read the JSON produced here.

use crate::world::RunReport;
use schelling_core::error::Result;
use std::path::Path;

/// Serialize a report as pretty-printed JSON.
pub fn to_json(report: &RunReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Save a report to a JSON file, creating parent directories as needed.
pub fn save_report(report: &RunReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, to_json(report)?)?;
    Ok(())
}

/// Load a report previously written by [`save_report`].
pub fn load_report(path: &Path) -> Result<RunReport> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
