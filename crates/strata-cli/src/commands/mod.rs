//! Command implementations and dispatch logic.
//!
//! Each command is implemented as an async function taking a CommandContext,
//! which holds the loaded configuration and a ready asset store.

use camino::Utf8PathBuf;
use strata_catalog::{snapshot, Catalog};
use strata_config::{ConfigLoader, StrataToml};
use strata_core::error::{StrataError, StrataResult};
use strata_store::{AssetStore, FilesystemStore};
use tracing::debug;

pub mod catalog;
pub mod key;
pub mod resolve;


use crate::Commands;

/// Shared context for all commands
pub struct CommandContext {
    pub config: StrataToml,
    pub store: AssetStore<Catalog>,
    pub snapshot_path: Utf8PathBuf,
}

impl CommandContext {
    /// Load configuration and open the store in the current directory
    pub async fn new() -> StrataResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| StrataError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd)
            .map_err(|p| StrataError::ConfigValidation {
                field: "cwd".to_string(),
                reason: format!("current directory is not UTF-8: {}", p.display()),
            })?;

        let (config, source) = ConfigLoader::new(cwd).load().await?;
        debug!("configuration loaded from {:?}", source);

        let catalog = snapshot::load_or_create(config.snapshot_path())?;
        let blobs = FilesystemStore::new(config.store_root())?;
        let store = AssetStore::new(
            catalog,
            blobs,
            config.store.legacy_filenames,
            config.store.denied_status,
        );

        Ok(Self {
            snapshot_path: config.snapshot_path(),
            config,
            store,
        })
    }

    /// Persist the catalog snapshot after a mutation
    pub fn save_catalog(&self) -> StrataResult<()> {
        snapshot::save(self.store.repo(), &self.snapshot_path)
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> StrataResult<()> {
    match command {
        Commands::Resolve {
            path,
            authenticated,
            grant,
        } => resolve::execute(path, authenticated, grant, ctx).await,
        Commands::Key {
            filename,
            hash,
            variant,
        } => key::execute(filename, hash, variant, ctx),
        Commands::Catalog { action } => catalog::execute(action, ctx).await,
    }
}
