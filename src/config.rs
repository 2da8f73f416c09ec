//! Configuration loaded from `tweetql.toml`.
//!
//! Every field has a default, so a missing file still yields a usable
//! configuration.

use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Result, TweetError};
use crate::store::IdPolicy;

/// Config file name looked up by [`Config::discover`].
pub const CONFIG_FILE: &str = "tweetql.toml";

/// Environment variable overriding `catalog.base_url`.
pub const CATALOG_URL_ENV: &str = "TWEETQL_CATALOG_URL";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub listen: String,
    /// Maximum query nesting depth
    pub depth_limit: usize,
    /// Maximum query complexity
    pub complexity_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1:4000".to_string(),
            depth_limit: 8,
            complexity_limit: 200,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://yts.mx/api/v2".to_string(),
            timeout_secs: 10,
            user_agent: "tweetql".to_string(),
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub id_policy: IdPolicy,
    /// JSON seed file; relative paths resolve against the config file's directory
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Parse a TOML string.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| TweetError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit file path.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let text = fs::read_to_string(path)?;
        let mut config = Self::from_toml(&text)?;

        if let (Some(seed), Some(dir)) = (config.store.seed_file.as_ref(), path.parent()) {
            if seed.is_relative() {
                config.store.seed_file = Some(dir.join(seed));
            }
        }
        Ok(config)
    }

    /// Load `{root}/tweetql.toml` if it exists, otherwise defaults.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            debug!(root = %root.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(url) = std::env::var(CATALOG_URL_ENV) {
            if !url.is_empty() {
                self.catalog.base_url = url;
            }
        }
        self
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.server.listen.parse().map_err(|e| {
            TweetError::Config(format!("server.listen {:?}: {}", self.server.listen, e))
        })
    }

    fn validate(&self) -> Result<()> {
        if self.catalog.timeout_secs == 0 {
            return Err(TweetError::Config("catalog.timeout_secs must be > 0".into()));
        }
        if self.catalog.base_url.is_empty() {
            return Err(TweetError::Config("catalog.base_url is empty".into()));
        }
        self.listen_addr()?;
        Ok(())
    }
}
