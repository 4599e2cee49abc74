//! Process configuration read from the environment

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_STORAGE_PATH: &str = "./ergoreader_data";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runtime configuration
///
/// Built once at startup and handed to the components that need it; nothing
/// in the core reads the environment after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Credential for the generative catalog API
    pub api_key: Option<String>,

    /// Model name used for catalog and chapter generation
    pub model: String,

    /// Base URL of the generative API
    pub api_base_url: String,

    /// Directory holding the local key/value store
    pub storage_path: PathBuf,

    /// Per-request timeout, `None` to wait indefinitely
    pub request_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }
}

impl Config {
    /// Load configuration from `ERGOREADER_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty("ERGOREADER_API_KEY")
            .or_else(|| non_empty("GEMINI_API_KEY"))
            .or_else(|| non_empty("API_KEY"));

        let request_timeout = match non_empty("ERGOREADER_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!("Ignoring invalid ERGOREADER_TIMEOUT_SECS value: {}", raw);
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        Self {
            api_key,
            model: non_empty("ERGOREADER_MODEL").unwrap_or(defaults.model),
            api_base_url: non_empty("ERGOREADER_API_BASE")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base_url),
            storage_path: non_empty("ERGOREADER_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            request_timeout,
        }
    }

    /// Override the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the storage directory
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }
}
