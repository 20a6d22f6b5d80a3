//! The `pathway export` command.

use std::path::PathBuf;

use anyhow::Result;

use pathway_report::csv::write_csv;

use super::open_assessor;

pub async fn execute(output: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (_, assessor) = open_assessor(config_path).await?;
    let records = assessor.records().await?;

    write_csv(&records, &output)?;
    println!("Exported {} record(s) to {}", records.len(), output.display());
    Ok(())
}
