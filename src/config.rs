//! Build-time configuration
//!
//! Values are baked in by `trunk build` from the environment, the same way the
//! site is deployed: set `FESTIVAL_API_URL`, `FESTIVAL_ADMIN_PASSWORD` and
//! `FESTIVAL_REQUEST_TIMEOUT_SECS` before building.

use std::time::Duration;

use festival_auth::AuthConfig;

use crate::api::{ApiClient, Timeouts};

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin. Empty means same origin as the page.
    pub api_base_url: String,
    /// Timeout for ordinary API requests.
    pub request_timeout: Duration,
    /// Admin password from the build environment, if one was set.
    pub admin_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            admin_password: None,
        }
    }
}

impl AppConfig {
    /// Resolve from variables captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("FESTIVAL_API_URL"),
            option_env!("FESTIVAL_REQUEST_TIMEOUT_SECS"),
            option_env!("FESTIVAL_ADMIN_PASSWORD"),
        )
    }

    /// Resolve from raw values. Blank or unparseable values fall back to the
    /// defaults.
    pub fn from_values(
        api_url: Option<&str>,
        timeout_secs: Option<&str>,
        admin_password: Option<&str>,
    ) -> Self {
        let defaults = Self::default();

        let api_base_url = api_url
            .map(str::trim)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let request_timeout = timeout_secs
            .and_then(|secs| secs.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let admin_password = admin_password
            .filter(|password| !password.is_empty())
            .map(str::to_string);

        Self {
            api_base_url,
            request_timeout,
            admin_password,
        }
    }

    /// Auth store configuration. An unset password uses the fallback.
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::from_password_source(self.admin_password.as_deref())
    }

    pub fn api_client(&self) -> ApiClient {
        ApiClient::new(self.api_base_url.clone())
            .with_timeouts(Timeouts::default().with_standard(self.request_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_values(None, None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.auth_config().admin_password, "admin123");
    }

    #[test]
    fn test_api_url_trailing_slash_trimmed() {
        let config = AppConfig::from_values(Some("https://festival.example/ "), None, None);
        assert_eq!(config.api_base_url, "https://festival.example");
    }

    #[test]
    fn test_bad_timeout_falls_back() {
        for raw in ["", "abc", "-5", "0"] {
            let config = AppConfig::from_values(None, Some(raw), None);
            assert_eq!(config.request_timeout, Duration::from_secs(30), "{raw:?}");
        }
        let config = AppConfig::from_values(None, Some("45"), None);
        assert_eq!(config.request_timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_admin_password_flows_into_auth_config() {
        let config = AppConfig::from_values(None, None, Some("letmein"));
        assert_eq!(config.auth_config().admin_password, "letmein");

        let empty = AppConfig::from_values(None, None, Some(""));
        assert!(empty.admin_password.is_none());
        assert_eq!(empty.auth_config().admin_password, "admin123");
    }

    #[test]
    fn test_api_client_uses_configured_timeout() {
        let config = AppConfig::from_values(Some("http://api"), Some("10"), None);
        let client = config.api_client();
        assert_eq!(client.base_url(), "http://api");
        assert_eq!(client.timeouts().standard, Duration::from_secs(10));
    }
}
