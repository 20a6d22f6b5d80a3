//! The `pathway submit` command.

use std::path::PathBuf;

use anyhow::Result;

use super::{open_assessor, read_submission};

pub async fn execute(input: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let request = read_submission(&input)?;
    let (_, assessor) = open_assessor(config_path).await?;

    let outcome = assessor.submit_request(request).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
