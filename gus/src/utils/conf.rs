//! Engine configuration, stored as TOML.
use std::path::{Path, PathBuf};

use gusl::{DEFAULT_DENYLIST, ProgramFilter};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    magic::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BATCH_SIZE, ENV_CONFIG_PATH},
    utils::error::{GusError, GusResult},
};

/// Tunables of a [`crate::engine::Gus`] instance.
///
/// Every field is optional in the TOML file; missing fields take their
/// default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GusConfig {
    /// Stop a search after this many enumerated candidates, including the
    /// ones the filter rejects. `None` searches until the caller accepts a
    /// guess.
    pub max_hypotheses: Option<u64>,

    /// Number of threads backtesting candidates. `1` runs the search on the
    /// calling thread.
    pub workers: usize,

    /// Candidates sharded across workers at once.
    pub batch_size: usize,

    /// Substrings that make a program inadmissible.
    pub denylist: Vec<String>,
}

impl Default for GusConfig {
    fn default() -> Self {
        Self {
            max_hypotheses: None,
            workers: 1,
            batch_size: DEFAULT_BATCH_SIZE,
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GusConfig {
    /// Get the default path to the GUS configuration file.
    pub fn default_path() -> PathBuf {
        if let Ok(config_path) = std::env::var(ENV_CONFIG_PATH) {
            return config_path.into();
        }

        let mut path = PathBuf::new();

        #[cfg(target_os = "windows")]
        {
            if let Ok(appdata) = std::env::var("APPDATA") {
                path.push(appdata);
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
                path.push(xdg_config_home);
            } else if let Ok(home) = std::env::var("HOME") {
                path.push(home);
                path.push(".config");
            }
        }

        path.push(CONFIG_DIR_NAME);
        path.push(CONFIG_FILE_NAME);
        path
    }

    /// Load a configuration from a TOML file.
    pub fn load_from_toml(path: &Path) -> GusResult<Self> {
        let toml_str = std::fs::read_to_string(path)?;

        toml::from_str(&toml_str).map_err(|e| GusError::ConfigParseError {
            source: e,
            file: path.display().to_string(),
        })
    }

    /// Load the configuration at `path` (or [`GusConfig::default_path`]).
    ///
    /// A missing file is not an error and yields the defaults. The loaded
    /// configuration is validated.
    pub fn load_or_default(path: Option<&Path>) -> GusResult<Self> {
        let path = path.map_or_else(Self::default_path, Path::to_path_buf);

        let config = if path.is_file() {
            debug!("Loading configuration from `{}`", path.display());
            Self::load_from_toml(&path)?
        } else {
            debug!("No configuration at `{}`, using defaults", path.display());
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a TOML file, creating parent directories.
    pub fn save_to_toml(&self, path: &Path) -> GusResult<()> {
        let toml_str = toml::to_string(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    /// Check the invariants the engine relies on.
    ///
    /// Denylist entries are plain substrings and need not be valid atoms, but
    /// an empty entry would match every program.
    pub fn validate(&self) -> GusResult<()> {
        if self.workers == 0 {
            return Err(GusError::InvalidConfig(
                "`workers` must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(GusError::InvalidConfig(
                "`batch_size` must be at least 1".to_string(),
            ));
        }
        if let Some(index) = self.denylist.iter().position(String::is_empty) {
            return Err(GusError::InvalidConfig(format!(
                "denylist entry #{index} is empty"
            )));
        }
        Ok(())
    }

    /// The admissibility filter described by this configuration.
    pub fn filter(&self) -> ProgramFilter {
        ProgramFilter::new(self.denylist.iter().cloned())
    }
}
