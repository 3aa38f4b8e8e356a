//! Client configuration.
//!
//! Loaded from an optional TOML file; every key has a default so an empty
//! or missing file yields a working configuration:
//!
//! ```toml
//! socket_path = "/var/run/bird/bird.ctl"
//! read_chunk_size = 1024
//! read_timeout_secs = 5
//! ```

use crate::error::{BirdError, BirdResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default location of the BIRD control socket.
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/bird/bird.ctl";

/// Default location of the client configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/bird/birdq.toml";

/// Connection settings for the control socket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Filesystem path of the control socket
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,

    /// Maximum number of bytes requested per socket read
    #[serde(default = "default_read_chunk_size")]
    pub read_chunk_size: usize,

    /// Socket read timeout in seconds (blocking forever when unset)
    #[serde(default)]
    pub read_timeout_secs: Option<u64>,

    /// Socket write timeout in seconds (blocking forever when unset)
    #[serde(default)]
    pub write_timeout_secs: Option<u64>,
}

fn default_socket_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOCKET_PATH)
}

fn default_read_chunk_size() -> usize {
    1024
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            socket_path: default_socket_path(),
            read_chunk_size: default_read_chunk_size(),
            read_timeout_secs: None,
            write_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Configuration for the given socket with every other setting defaulted.
    pub fn for_socket(path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: path.into(),
            ..Self::default()
        }
    }

    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> BirdResult<Self> {
        toml::from_str(content)
            .map_err(|e| BirdError::config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> BirdResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => {
                let config = toml::from_str(&content).map_err(|e| {
                    BirdError::config(format!(
                        "Failed to parse config file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                tracing::debug!(path = %path.display(), "Loaded client configuration");
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    path = %path.display(),
                    "Config file not found, using defaults"
                );
                Ok(Self::default())
            }
            Err(e) => Err(BirdError::config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Load from default location or defaults
    pub fn load() -> BirdResult<Self> {
        Self::load_or_default(DEFAULT_CONFIG_PATH)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_secs.map(Duration::from_secs)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        self.write_timeout_secs.map(Duration::from_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> BirdResult<()> {
        if self.socket_path.as_os_str().is_empty() {
            return Err(BirdError::config("socket_path must not be empty"));
        }

        if self.read_chunk_size == 0 {
            return Err(BirdError::config("read_chunk_size must be > 0"));
        }

        // A zero timeout is rejected by the socket layer itself.
        if self.read_timeout_secs == Some(0) {
            return Err(BirdError::config("read_timeout_secs must be > 0"));
        }

        if self.write_timeout_secs == Some(0) {
            return Err(BirdError::config("write_timeout_secs must be > 0"));
        }

        Ok(())
    }
}
