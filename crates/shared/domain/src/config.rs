use crate::constants::DEFAULT_API_URL;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level client configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfigInner {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub log: LogConfig,
}

/// Arc-wrapped config so sessions and commands can clone it freely.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(flatten, default)]
    inner: Arc<ClientConfigInner>,
}

impl Deref for ClientConfig {
    type Target = ClientConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ClientConfig {
    fn deref_mut(&mut self) -> &mut ClientConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// REST backend connection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Where the session token store lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
    /// `false` keeps tokens in memory for the lifetime of the process.
    pub persist: bool,
}

/// Logging knobs consumed by the terminal front end.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub filter: Option<String>,
    pub json: bool,
    pub directory: Option<PathBuf>,
}

// --- Default ---

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_owned(),
            timeout_secs: 30,
            user_agent: concat!("fleetdesk/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: PathBuf::from(".fleetdesk/session.json"), persist: true }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: "warn".to_owned(), filter: None, json: false, directory: None }
    }
}
