//! eventcal configuration.
//!
//! Read from `~/.config/eventcal/config.toml` (created with everything
//! commented out on first use), then overridden by `EVENTCAL__SECTION__KEY`
//! environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{EventCalError, EventCalResult};
use crate::recurrence::ExpandOptions;

static DEFAULT_DATA_FILE: &str = "~/.local/share/eventcal/events.json";
static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4096";
const DEFAULT_PORT: u16 = 4096;

fn default_address() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT))
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct EventCalConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub recurrence: ExpandOptions,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: default_address(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Events file; `~` is expanded
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            data_file: default_data_file(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            server_url: default_server_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// tracing EnvFilter directive, e.g. "info" or "eventcal_server=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_log_level(),
        }
    }
}

impl EventCalConfig {
    pub fn config_path() -> EventCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventCalError::Config("Could not determine config directory".into()))?
            .join("eventcal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path, creating a commented-out file there
    /// if none exists yet.
    pub fn load() -> EventCalResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional) plus the environment.
    pub fn load_from(path: &Path) -> EventCalResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("EVENTCAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| EventCalError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventCalError::Config(e.to_string()))
    }

    pub fn data_file(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.storage.data_file.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn expand_options(&self) -> ExpandOptions {
        self.recurrence
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventCalResult<()> {
        let contents = format!(
            "\
# eventcal configuration

[server]
# address = \"{}\"

[storage]
# data_file = \"{}\"

[recurrence]
# Stop recurring events after their recurrence end date:
# enforce_recurrence_end = false

[client]
# server_url = \"{}\"

[logging]
# level = \"info\"
",
            default_address(),
            DEFAULT_DATA_FILE,
            DEFAULT_SERVER_URL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
