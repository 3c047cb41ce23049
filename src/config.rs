//! Client configuration.
//!
//! ```rust,no_run
//! use bakery_admin::config::ClientConfig;
//! use std::time::Duration;
//!
//! let config = ClientConfig::new("https://api.example.com/api/admin")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_default_per_page(25);
//! ```

use std::time::Duration;

use crate::errors::{ApiError, ApiResult};

/// Environment variable holding the API root URL
pub const ENV_API_URL: &str = "BAKERY_ADMIN_API_URL";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "BAKERY_ADMIN_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_PER_PAGE: u32 = 15;

/// Configuration for the HTTP client and the list pages built on top of it
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    api_root: String,
    timeout: Duration,
    user_agent: String,
    default_per_page: u32,
}

impl ClientConfig {
    /// Create a config pointing at the given API root with default settings
    pub fn new(api_root: impl Into<String>) -> Self {
        Self {
            api_root: api_root.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("bakery-admin/", env!("CARGO_PKG_VERSION")).to_string(),
            default_per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Build a config from `BAKERY_ADMIN_API_URL` and `BAKERY_ADMIN_TIMEOUT_SECS`.
    pub fn from_env() -> ApiResult<Self> {
        let api_root = std::env::var(ENV_API_URL)
            .map_err(|_| ApiError::Config(format!("{ENV_API_URL} is not set")))?;
        let mut config = Self::new(api_root);

        if let Ok(raw) = std::env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ApiError::Config(format!("{ENV_TIMEOUT_SECS} must be a number, got {raw:?}"))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_default_per_page(mut self, per_page: u32) -> Self {
        self.default_per_page = per_page;
        self
    }

    /// Check that the config can actually be used to issue requests
    pub fn validate(&self) -> ApiResult<()> {
        if self.api_root.is_empty() {
            return Err(ApiError::Config("API root must not be empty".to_string()));
        }
        if !(self.api_root.starts_with("http://") || self.api_root.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "API root must be an http(s) URL, got {:?}",
                self.api_root
            )));
        }
        if self.default_per_page == 0 {
            return Err(ApiError::Config("default per_page must be positive".to_string()));
        }
        Ok(())
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub fn default_per_page(&self) -> u32 {
        self.default_per_page
    }

    /// Join a resource path onto the API root
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.api_root, path.trim_start_matches('/'))
    }
}
