//! The `pathway report` command.

use std::path::PathBuf;

use anyhow::Result;

use pathway_report::pdf::write_report;

use super::open_assessor;

pub async fn execute(id: i64, output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (config, assessor) = open_assessor(config_path).await?;
    let record = assessor.record(id).await?;

    write_report(&record, &config.branding, &output)?;
    println!(
        "Wrote report for {} to {}",
        record.identity.name,
        output.display()
    );
    Ok(())
}
