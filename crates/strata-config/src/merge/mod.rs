//! Configuration layering, fallback logic, and environment overrides

use std::collections::HashMap;
use camino::Utf8PathBuf;
use strata_core::error::StrataError;
use crate::{ConfigResult, toml::StrataToml};

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// strata.toml file
    File(Utf8PathBuf),
    /// Built-in defaults (no file found)
    Defaults,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load configuration with fallbacks: strata.toml if present, built-in
    /// defaults otherwise, environment overrides applied on top of either.
    pub async fn load(&self) -> ConfigResult<(StrataToml, ConfigSource)> {
        let (mut config, source) = match self.resolve_config_path("strata.toml") {
            Some(path) => {
                let config = crate::toml::load_from_file(&path).await?;
                (config, ConfigSource::File(path))
            }
            None => (StrataToml::default(), ConfigSource::Defaults),
        };

        apply_env_overrides(&mut config, &collect_env_overrides())?;
        crate::toml::validate_config(&config)?;

        Ok((config, source))
    }

    /// Find a configuration file by walking up the directory tree
    pub fn resolve_config_path(&self, filename: &str) -> Option<Utf8PathBuf> {
        let mut current = self.cwd.as_path();

        loop {
            let config_path = current.join(filename);
            if config_path.exists() {
                return Some(config_path);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return None,
            }
        }
    }
}

/// Apply environment variable overrides on top of a parsed configuration
pub fn apply_env_overrides(
    config: &mut StrataToml,
    overrides: &HashMap<String, String>,
) -> ConfigResult<()> {
    for (key, value) in overrides {
        match key.as_str() {
            "STRATA_STORE_ROOT" => {
                config.store.root = value.clone();
            }
            "STRATA_LEGACY_FILENAMES" => {
                config.store.legacy_filenames = value.parse()
                    .map_err(|_| StrataError::ConfigValidation {
                        field: "STRATA_LEGACY_FILENAMES".to_string(),
                        reason: format!("expected true or false, got '{}'", value),
                    })?;
            }
            "STRATA_DENIED_STATUS" => {
                let status: u16 = value.parse()
                    .map_err(|_| StrataError::ConfigValidation {
                        field: "STRATA_DENIED_STATUS".to_string(),
                        reason: format!("expected a status code, got '{}'", value),
                    })?;
                crate::toml::validate_denied_status(status)?;
                config.store.denied_status = status;
            }
            "STRATA_CATALOG_SNAPSHOT" => {
                config.catalog.snapshot = value.clone();
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }
    }

    Ok(())
}

/// Collect environment variable overrides
pub fn collect_env_overrides() -> HashMap<String, String> {
    let mut overrides = HashMap::new();

    for (key, value) in std::env::vars() {
        if key.starts_with("STRATA_") {
            overrides.insert(key, value);
        }
    }

    overrides
}
