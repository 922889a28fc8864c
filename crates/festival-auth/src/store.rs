//! The session auth store.

use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::config::AuthConfig;
use crate::error::StorageError;
use crate::state::{AuthSnapshot, PersistedAuth};
use crate::storage::SessionStorage;

/// Single source of truth for whether this browser session is signed in as
/// an admin.
///
/// State lives in memory and is mirrored to session storage on login and
/// logout. Consumers read it through the accessors or [`subscribe`], which
/// observe each change as soon as the mutating call returns.
///
/// Storage failures never escape: the store logs them and carries on with
/// in-memory state for the rest of the session.
///
/// [`subscribe`]: AuthStore::subscribe
pub struct AuthStore {
    config: AuthConfig,
    storage: Box<dyn SessionStorage>,
    state: watch::Sender<AuthSnapshot>,
    degraded: AtomicBool,
}

impl AuthStore {
    /// Create a store. Nothing is read from storage until [`initialize`]
    /// runs, so the initial snapshot reports `is_loading = true`.
    ///
    /// [`initialize`]: AuthStore::initialize
    pub fn new(config: AuthConfig, storage: impl SessionStorage + 'static) -> Self {
        if config.uses_fallback_password() {
            warn!("Using the default admin password");
        }
        let (state, _) = watch::channel(AuthSnapshot::booting());
        Self {
            config,
            storage: Box::new(storage),
            state,
            degraded: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Rehydrate from session storage. Runs once at startup.
    ///
    /// A parseable entry is adopted as-is. A corrupt entry is deleted and the
    /// store falls back to the signed-out default. Never fails.
    #[instrument(skip(self), fields(key = %self.config.storage_key))]
    pub fn initialize(&self) {
        self.set_loading(true);

        let restored = match self.storage.get(&self.config.storage_key) {
            Ok(Some(raw)) => match PersistedAuth::decode(&raw) {
                Ok(record) => {
                    debug!(
                        is_authenticated = record.is_authenticated,
                        is_admin = record.is_admin,
                        "Restored auth state"
                    );
                    AuthSnapshot::from(record)
                }
                Err(e) => {
                    warn!(error = %e, "Discarding corrupt auth state");
                    self.remove_persisted();
                    AuthSnapshot::default()
                }
            },
            Ok(None) => AuthSnapshot::default(),
            Err(e) => {
                self.degrade(&e);
                AuthSnapshot::default()
            }
        };

        self.state.send_replace(restored);
    }

    /// Check `password` against the configured admin password.
    ///
    /// On a match the session becomes authenticated with admin capability and
    /// the record is persisted. A wrong or empty password leaves the state
    /// untouched and returns `false`.
    #[instrument(skip_all)]
    pub async fn login(&self, password: &str) -> bool {
        self.set_loading(true);

        if !self.verify(password) {
            debug!("Admin login rejected");
            self.set_loading(false);
            return false;
        }

        let record = PersistedAuth::admin_login();
        match record.encode() {
            Ok(encoded) => {
                if let Err(e) = self.storage.set(&self.config.storage_key, &encoded) {
                    self.degrade(&e);
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode auth state"),
        }

        self.state.send_replace(AuthSnapshot::from(record));
        info!("Admin logged in");
        true
    }

    /// Sign out: drop the persisted entry and reset to the signed-out state.
    /// Calling it while signed out is a no-op.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.remove_persisted();

        let was_authenticated = self.state.borrow().is_authenticated;
        self.state.send_modify(|s| {
            s.is_authenticated = false;
            s.is_admin = false;
        });
        if was_authenticated {
            info!("Admin logged out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().is_admin
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> AuthSnapshot {
        *self.state.borrow()
    }

    /// Receiver that sees every state change.
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    /// Whether a storage failure has pushed the store into memory-only mode.
    pub fn persistence_degraded(&self) -> bool {
        self.degraded.load(Ordering::Relaxed)
    }

    fn verify(&self, password: &str) -> bool {
        !password.is_empty() && password == self.config.admin_password
    }

    fn set_loading(&self, loading: bool) {
        self.state.send_if_modified(|s| {
            let changed = s.is_loading != loading;
            s.is_loading = loading;
            changed
        });
    }

    /// Drop the persisted record. If the backend refuses the delete, the
    /// entry is overwritten with a signed-out record so a later
    /// `initialize` cannot restore the old session.
    fn remove_persisted(&self) {
        let Err(e) = self.storage.remove(&self.config.storage_key) else {
            return;
        };
        self.degrade(&e);

        let overwrite = PersistedAuth::signed_out()
            .encode()
            .map_err(|e| StorageError::Write(e.to_string()))
            .and_then(|encoded| self.storage.set(&self.config.storage_key, &encoded));
        if let Err(e) = overwrite {
            warn!(error = %e, "Could not clear persisted auth state");
        }
    }

    fn degrade(&self, error: &StorageError) {
        if !self.degraded.swap(true, Ordering::Relaxed) {
            warn!(error = %error, "Session storage failed; keeping auth state in memory only");
        } else {
            debug!(error = %error, "Session storage still failing");
        }
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("storage_key", &self.config.storage_key)
            .field("state", &*self.state.borrow())
            .field("degraded", &self.persistence_degraded())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn store_with(storage: &MemoryStorage) -> AuthStore {
        AuthStore::new(AuthConfig::default(), storage.clone())
    }

    #[test]
    fn test_new_store_is_loading() {
        let store = store_with(&MemoryStorage::new());
        assert!(store.is_loading());
        assert!(!store.is_authenticated());
        assert!(!store.is_admin());
    }

    #[test]
    fn test_initialize_empty_storage() {
        let store = store_with(&MemoryStorage::new());
        store.initialize();
        assert_eq!(store.snapshot(), AuthSnapshot::default());
    }

    #[tokio::test]
    async fn test_login_rejects_empty_password() {
        let storage = MemoryStorage::new();
        let store = AuthStore::new(AuthConfig::default(), storage.clone());
        store.initialize();

        assert!(!store.login("").await);
        assert!(!store.is_authenticated());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_login_persists_record() {
        let storage = MemoryStorage::new();
        let store = store_with(&storage);
        store.initialize();

        assert!(store.login("admin123").await);

        let raw = storage.get("admin_auth").unwrap().expect("record persisted");
        let record = PersistedAuth::decode(&raw).unwrap();
        assert!(record.is_authenticated);
        assert!(record.is_admin);
        assert!(record.timestamp.is_some());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_custom_storage_key() {
        let storage = MemoryStorage::new();
        let store = AuthStore::new(
            AuthConfig::default().with_storage_key("festival_admin"),
            storage.clone(),
        );
        store.initialize();
        store.login("admin123").await;

        assert!(storage.get("festival_admin").unwrap().is_some());
        assert!(storage.get("admin_auth").unwrap().is_none());
    }

    #[test]
    fn test_initialize_adopts_partial_record() {
        let storage = MemoryStorage::new();
        storage
            .set("admin_auth", r#"{"isAuthenticated":true,"isAdmin":false}"#)
            .unwrap();
        let store = store_with(&storage);
        store.initialize();

        assert!(store.is_authenticated());
        assert!(!store.is_admin());
        assert!(storage.get("admin_auth").unwrap().is_some());
    }
}
