//! Init command implementation

use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::EntityStore;
use std::path::PathBuf;
use tracing::info;

/// Write a default config and create the database schema
pub async fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<Config> {
    let mut config = Config::default();
    config.init_paths(base_dir);

    if config.paths.config_file.exists() && !force {
        return Err(Error::AlreadyInitialized(
            config.paths.base_dir.display().to_string(),
        ));
    }

    std::fs::create_dir_all(&config.paths.base_dir)?;

    config.validate()?;
    config.save()?;
    info!("Created config at {:?}", config.paths.config_file);

    let store = EntityStore::connect(&config).await?;
    store.init_schema().await?;
    info!("Created database at {:?}", config.paths.db_file);

    Ok(config)
}
