//! The `pathway serve` command.

use std::path::PathBuf;

use anyhow::Result;

use pathway_server::load_config_from;

pub async fn execute(config_path: Option<PathBuf>, bind: Option<String>) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }
    pathway_server::serve(config).await
}
