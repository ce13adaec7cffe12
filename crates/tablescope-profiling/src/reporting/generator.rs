use anyhow::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

use crate::types::DataProfile;

/// Writes profiling reports to disk.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: Option<String>,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
            output_name: None,
        }
    }
}

impl ReportGenerator {
    /// Create a new ReportGenerator with custom output settings.
    ///
    /// `output_name` overrides the base name passed to
    /// [`write_profile_report`](Self::write_profile_report) when set.
    pub fn new(output_dir: PathBuf, output_name: Option<String>) -> Self {
        Self {
            output_dir,
            output_name,
        }
    }

    /// Render a profile as pretty-printed JSON.
    pub fn profile_to_json(&self, profile: &DataProfile) -> Result<String> {
        Ok(serde_json::to_string_pretty(profile)?)
    }

    /// Write the missing-data report file and return its path.
    ///
    /// The output directory is created if needed; the file is named
    /// `<base>_profile.json`.
    pub fn write_profile_report(
        &self,
        profile: &DataProfile,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let base = self
            .output_name
            .as_deref()
            .unwrap_or(report_base_name);
        let report_path = self.output_dir.join(format!("{}_profile.json", base));
        let mut file = File::create(&report_path)?;
        file.write_all(self.profile_to_json(profile)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
