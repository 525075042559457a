use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::pagination::RowsPerPage;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "sdg-browser.json";
/// Overrides the config file location.
pub const CONFIG_ENV: &str = "SDG_BROWSER_CONFIG";
/// Overrides the data file location.
pub const DATA_ENV: &str = "SDG_BROWSER_DATA";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("rows_per_page must be 10, 20 or 50, got {0}")]
    InvalidRowsPerPage(usize),
}

/// Startup settings for the browser window.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserConfig {
    /// CSV to load at startup. Nothing is loaded when unset.
    pub data_path: Option<PathBuf>,
    pub rows_per_page: usize,
    pub window_size: [f32; 2],
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            data_path: Some(PathBuf::from("data/sdgs.csv")),
            rows_per_page: RowsPerPage::default().get(),
            window_size: [1200.0, 800.0],
        }
    }
}

impl BrowserConfig {
    /// Parse a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: BrowserConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.rows_per_page()?;
        Ok(config)
    }

    /// Resolve the startup configuration.
    ///
    /// Defaults, then the config file (`$SDG_BROWSER_CONFIG` or
    /// `./sdg-browser.json` if present), then `$SDG_BROWSER_DATA`, then the
    /// first command-line argument as the data path.
    pub fn resolve(
        config_env: Option<PathBuf>,
        data_env: Option<PathBuf>,
        cli_data: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_env {
            Some(path) => Self::from_file(&path)?,
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() {
                    Self::from_file(local)?
                } else {
                    Self::default()
                }
            }
        };
        if let Some(path) = data_env {
            config.data_path = Some(path);
        }
        if let Some(path) = cli_data {
            config.data_path = Some(path);
        }
        Ok(config)
    }

    /// Resolve from the process environment and arguments.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            std::env::var_os(DATA_ENV).map(PathBuf::from),
            std::env::args_os().nth(1).map(PathBuf::from),
        )
    }

    pub fn rows_per_page(&self) -> Result<RowsPerPage, ConfigError> {
        RowsPerPage::new(self.rows_per_page)
            .ok_or(ConfigError::InvalidRowsPerPage(self.rows_per_page))
    }
}
