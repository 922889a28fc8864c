//! Configuration for the auth store.

/// Fallback admin password used when none is configured.
///
/// This is a placeholder credential, not a secret.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Session storage key holding the persisted auth record.
pub const DEFAULT_STORAGE_KEY: &str = "admin_auth";

/// Path the route guard redirects unauthenticated visitors to.
pub const DEFAULT_LOGIN_PATH: &str = "/admin/login";

/// Auth store configuration, resolved once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Password compared against on login.
    pub admin_password: String,

    /// Key of the persisted record in session storage.
    pub storage_key: String,

    /// Login entry point used by the route guard.
    pub login_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

impl AuthConfig {
    /// Build a configuration from an optional password source such as a
    /// build-time environment variable.
    ///
    /// An absent or empty value falls back to [`DEFAULT_ADMIN_PASSWORD`].
    pub fn from_password_source(source: Option<&str>) -> Self {
        match source {
            Some(password) if !password.is_empty() => {
                Self::default().with_admin_password(password)
            }
            _ => Self::default(),
        }
    }

    /// Set the admin password.
    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = password.into();
        self
    }

    /// Set the session storage key.
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Set the login path used for redirects.
    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    /// Whether the configured password equals the default, whether it came
    /// from the fallback or was set explicitly.
    pub fn uses_fallback_password(&self) -> bool {
        self.admin_password == DEFAULT_ADMIN_PASSWORD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.admin_password, "admin123");
        assert_eq!(config.storage_key, "admin_auth");
        assert_eq!(config.login_path, "/admin/login");
        assert!(config.uses_fallback_password());
    }

    #[test]
    fn test_explicit_default_password_counts_as_default() {
        let config = AuthConfig::from_password_source(Some(DEFAULT_ADMIN_PASSWORD));
        assert_eq!(config.admin_password, "admin123");
        assert!(config.uses_fallback_password());
    }

    #[test]
    fn test_password_source_present() {
        let config = AuthConfig::from_password_source(Some("s3cret"));
        assert_eq!(config.admin_password, "s3cret");
        assert!(!config.uses_fallback_password());
    }

    #[test]
    fn test_password_source_missing_or_empty() {
        assert_eq!(
            AuthConfig::from_password_source(None).admin_password,
            DEFAULT_ADMIN_PASSWORD
        );
        assert_eq!(
            AuthConfig::from_password_source(Some("")).admin_password,
            DEFAULT_ADMIN_PASSWORD
        );
    }

    #[test]
    fn test_builder_chaining() {
        let config = AuthConfig::default()
            .with_storage_key("other_key")
            .with_login_path("/login");
        assert_eq!(config.storage_key, "other_key");
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.admin_password, DEFAULT_ADMIN_PASSWORD);
    }
}
