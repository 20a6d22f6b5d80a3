//! The `pathway init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("pathway.toml").exists() {
        println!("pathway.toml already exists, skipping.");
    } else {
        std::fs::write("pathway.toml", SAMPLE_CONFIG)?;
        println!("Created pathway.toml");
    }

    println!("\nNext steps:");
    println!("  1. Export PATHWAY_ADMIN_SECRET to enable the admin login");
    println!("  2. Run: pathway serve");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# pathway configuration

bind_addr = "0.0.0.0:8000"
database_path = "./career_guidance.db"
admin_secret = "${PATHWAY_ADMIN_SECRET}"

# Reject blank identity fields and ratings outside 1-5.
strict_validation = false

[branding]
institution = "SOPHIA ACADEMY"
report_title = "SSLC Career Guidance Report"
export_filename = "sslc_career_guidance_data.csv"
report_filename_prefix = "Sophia_Report"
"#;
