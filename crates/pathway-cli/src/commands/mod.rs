//! Subcommand implementations.

pub mod export;
pub mod init;
pub mod list;
pub mod report;
pub mod score;
pub mod serve;
pub mod submit;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use pathway_core::{Assessor, SubmissionRequest};
use pathway_server::{load_config_from, PathwayConfig};
use pathway_store::SqliteStore;

/// Load config and open the configured SQLite store.
async fn open_assessor(config_path: Option<PathBuf>) -> Result<(PathwayConfig, Assessor)> {
    let config = load_config_from(config_path.as_deref())?;
    let store = SqliteStore::open(&config.database_path).await?;
    let assessor = Assessor::new(Arc::new(store), config.validation_policy());
    Ok((config, assessor))
}

/// Read a submission body from a JSON file.
fn read_submission(path: &Path) -> Result<SubmissionRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse submission {}", path.display()))
}
