//! Runtime settings — defaults, environment overrides, validation.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::cache::DEFAULT_TTL;
use crate::resolver::DEFAULT_RESOLVER_TIMEOUT;

/// Default remote browserslist config.
pub const DEFAULT_CONFIG_URL: &str =
    "https://raw.githubusercontent.com/Yoast/javascript/develop/packages/browserslist-config/src/index.js";

/// Default base URL under which `images/<id>.png` icons are served.
pub const DEFAULT_ICON_BASE_URL: &str = "/browsershelf";

/// Default HTTP timeout for the config fetch.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Pipeline settings.
///
/// Resolution order: built-in default, then `BROWSERSHELF_*` environment
/// variable, then explicit setter (the CLI maps flags onto setters).
#[derive(Debug, Clone)]
pub struct Settings {
    /// URL of the remote browserslist config.
    pub config_url: String,
    /// Directory holding cache entry files.
    pub cache_dir: PathBuf,
    /// Freshness window for the cached config.
    pub cache_ttl: Duration,
    /// Base URL for browser icons.
    pub icon_base_url: String,
    /// Timeout for the config fetch request.
    pub http_timeout: Duration,
    /// Wall-clock budget for one resolver invocation.
    pub resolver_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_url: DEFAULT_CONFIG_URL.to_string(),
            cache_dir: default_cache_dir(),
            cache_ttl: DEFAULT_TTL,
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            resolver_timeout: DEFAULT_RESOLVER_TIMEOUT,
        }
    }
}

/// `~/.browsershelf/cache`, falling back to a temp path without a home dir.
pub fn default_cache_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".browsershelf")
        .join("cache")
}

impl Settings {
    /// Defaults with `BROWSERSHELF_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(url) = std::env::var("BROWSERSHELF_CONFIG_URL") {
            settings.config_url = url;
        }
        if let Ok(dir) = std::env::var("BROWSERSHELF_CACHE_DIR") {
            settings.cache_dir = PathBuf::from(dir);
        }
        if let Ok(base) = std::env::var("BROWSERSHELF_ICON_BASE_URL") {
            settings.icon_base_url = base;
        }
        settings
    }

    /// Validate that the config URL parses as an absolute URL.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.config_url)
            .with_context(|| format!("invalid config URL: {}", self.config_url))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        Settings::default().validate().unwrap();
    }

    #[test]
    fn test_invalid_url_rejected() {
        let settings = Settings {
            config_url: "not a url".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_default_ttl_is_24_hours() {
        assert_eq!(Settings::default().cache_ttl, Duration::from_secs(86_400));
    }
}
