#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::storage::DEFAULT_STORE_PATH;
use crate::domain::model::MovePolicy;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{self, Validate};
use std::path::PathBuf;
use toml_config::TomlConfig;

pub const DEFAULT_LISTEN: &str = ":8080";

/// Effective server settings after defaults, TOML and flags are layered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub listen: String,
    pub store_path: PathBuf,
    pub ui_dir: Option<PathBuf>,
    pub move_policy: MovePolicy,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            ui_dir: None,
            move_policy: MovePolicy::default(),
            log_format: LogFormat::default(),
            verbose: false,
        }
    }
}

impl Settings {
    /// Overlay whatever the TOML file sets.
    pub fn merge_toml(mut self, config: &TomlConfig) -> Self {
        if let Some(listen) = &config.server.listen {
            self.listen = listen.clone();
        }
        if let Some(ui_dir) = &config.server.ui_dir {
            self.ui_dir = Some(PathBuf::from(ui_dir));
        }
        if let Some(path) = &config.store.path {
            self.store_path = PathBuf::from(path);
        }
        if let Some(policy) = config.inventory.move_policy {
            self.move_policy = policy;
        }
        if let Some(format) = config.logging.format {
            self.log_format = format;
        }
        if let Some(verbose) = config.logging.verbose {
            self.verbose = verbose;
        }
        self
    }

    /// Listen address ready for binding, `:port` expanded to all interfaces.
    pub fn bind_addr(&self) -> Result<String> {
        validation::parse_listen_addr("server.listen", &self.listen)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.listen", &self.listen)?;
        self.bind_addr()?;
        validation::validate_path("store.path", &self.store_path.to_string_lossy())?;
        if let Some(dir) = &self.ui_dir {
            validation::validate_directory("server.ui_dir", dir)?;
        }
        Ok(())
    }
}
