//! Institution branding for generated artifacts.

use serde::{Deserialize, Serialize};

/// Text and filenames stamped onto exports and reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branding {
    /// Printed as the report header.
    #[serde(default = "default_institution")]
    pub institution: String,
    /// Printed under the header.
    #[serde(default = "default_report_title")]
    pub report_title: String,
    /// Download name for the bulk CSV export.
    #[serde(default = "default_export_filename")]
    pub export_filename: String,
    /// Prefix of per-student report filenames.
    #[serde(default = "default_report_filename_prefix")]
    pub report_filename_prefix: String,
}

fn default_institution() -> String {
    "SOPHIA ACADEMY".to_string()
}
fn default_report_title() -> String {
    "SSLC Career Guidance Report".to_string()
}
fn default_export_filename() -> String {
    "sslc_career_guidance_data.csv".to_string()
}
fn default_report_filename_prefix() -> String {
    "Sophia_Report".to_string()
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            institution: default_institution(),
            report_title: default_report_title(),
            export_filename: default_export_filename(),
            report_filename_prefix: default_report_filename_prefix(),
        }
    }
}

impl Branding {
    /// `{prefix}_{name}.pdf`, with anything outside `[A-Za-z0-9_-]` in the
    /// name replaced by `_` so it is safe in a `Content-Disposition` header.
    pub fn report_filename(&self, student_name: &str) -> String {
        let name: String = student_name
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let name = if name.is_empty() { "student".to_string() } else { name };
        format!("{}_{}.pdf", self.report_filename_prefix, name)
    }
}
