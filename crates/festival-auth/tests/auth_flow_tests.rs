//! Integration tests for the admin session gate
//!
//! These tests drive `AuthStore` and `RouteGuard` together the way the UI
//! does: boot, rehydrate, log in, log out, and reload.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use festival_auth::{
    AuthConfig, AuthSnapshot, AuthStore, GuardDecision, GuardState, MemoryStorage, RouteGuard,
    SessionStorage, StorageError, StorageResult,
};

const PASSWORD: &str = "admin123";

fn signed_out() -> AuthSnapshot {
    AuthSnapshot::default()
}

fn admin() -> AuthSnapshot {
    AuthSnapshot {
        is_authenticated: true,
        is_admin: true,
        is_loading: false,
    }
}

/// Storage that fails every call, as when the browser disables it.
#[derive(Default)]
struct DisabledStorage {
    calls: AtomicUsize,
}

impl SessionStorage for DisabledStorage {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Unavailable("disabled by policy".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Write("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::Unavailable("disabled by policy".into()))
    }
}

/// Storage whose deletes fail while reads and writes still work.
#[derive(Default)]
struct StuckRemoveStorage {
    inner: MemoryStorage,
}

impl SessionStorage for StuckRemoveStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.inner.set(key, value)
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Err(StorageError::Write("remove blocked".into()))
    }
}

fn booted(storage: &MemoryStorage) -> AuthStore {
    let store = AuthStore::new(AuthConfig::default(), storage.clone());
    store.initialize();
    store
}

#[cfg(test)]
mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_wrong_passwords_are_rejected() {
        let storage = MemoryStorage::new();
        let store = booted(&storage);

        for attempt in ["wrong", "", " admin123", "admin123 ", "ADMIN123", "admin12"] {
            assert!(!store.login(attempt).await, "accepted {attempt:?}");
            assert_eq!(store.snapshot(), signed_out());
        }
        assert!(storage.get("admin_auth").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_correct_password_grants_admin() {
        let storage = MemoryStorage::new();
        let store = booted(&storage);

        assert!(store.login(PASSWORD).await);
        assert_eq!(store.snapshot(), admin());
        assert!(storage.get("admin_auth").unwrap().is_some());
    }

    #[tokio::test]
    async fn test_configured_password_replaces_fallback() {
        let storage = MemoryStorage::new();
        let store = AuthStore::new(
            AuthConfig::from_password_source(Some("festival-2024")),
            storage.clone(),
        );
        store.initialize();

        assert!(!store.login(PASSWORD).await);
        assert!(store.login("festival-2024").await);
        assert!(store.is_admin());
    }

    #[tokio::test]
    async fn test_concrete_scenario() {
        let storage = MemoryStorage::new();
        let store = booted(&storage);

        assert!(!store.login("wrong").await);
        assert!(store.login("admin123").await);
        assert!(store.is_authenticated() && store.is_admin());

        store.logout();
        assert!(!store.is_authenticated());
        assert!(!store.is_admin());
        assert!(storage.get("admin_auth").unwrap().is_none());
    }
}

#[cfg(test)]
mod logout_tests {
    use super::*;

    #[tokio::test]
    async fn test_logout_clears_memory_and_storage() {
        let storage = MemoryStorage::new();
        let store = booted(&storage);
        store.login(PASSWORD).await;

        store.logout();

        assert_eq!(store.snapshot(), signed_out());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_logout_twice_is_noop() {
        let storage = MemoryStorage::new();
        let store = booted(&storage);
        store.login(PASSWORD).await;

        store.logout();
        let after_first = store.snapshot();
        store.logout();

        assert_eq!(store.snapshot(), after_first);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_logout_when_never_logged_in() {
        let storage = MemoryStorage::new();
        let store = booted(&storage);
        store.logout();
        assert_eq!(store.snapshot(), signed_out());
    }
}

#[cfg(test)]
mod rehydration_tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_store_restores_login() {
        let storage = MemoryStorage::new();
        let first = booted(&storage);
        first.login(PASSWORD).await;
        drop(first);

        let second = AuthStore::new(AuthConfig::default(), storage.clone());
        assert!(second.is_loading());
        second.initialize();

        assert_eq!(second.snapshot(), admin());
    }

    #[tokio::test]
    async fn test_fresh_store_after_logout_is_signed_out() {
        let storage = MemoryStorage::new();
        let first = booted(&storage);
        first.login(PASSWORD).await;
        first.logout();

        let second = booted(&storage);
        assert_eq!(second.snapshot(), signed_out());
    }

    #[test]
    fn test_corrupt_entry_is_discarded() {
        let storage = MemoryStorage::new();
        storage.set("admin_auth", "{not valid json").unwrap();

        let store = booted(&storage);

        assert_eq!(store.snapshot(), signed_out());
        assert!(storage.get("admin_auth").unwrap().is_none());
        assert!(!store.persistence_degraded());
    }

    #[test]
    fn test_non_object_entry_is_discarded() {
        let storage = MemoryStorage::new();
        storage.set("admin_auth", "true").unwrap();

        let store = booted(&storage);

        assert_eq!(store.snapshot(), signed_out());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_unrelated_keys_untouched() {
        let storage = MemoryStorage::new();
        storage.set("festival_chat_session", "abc").unwrap();
        storage.set("admin_auth", "garbage").unwrap();

        let store = booted(&storage);
        store.logout();

        assert_eq!(
            storage.get("festival_chat_session").unwrap().as_deref(),
            Some("abc")
        );
    }
}

#[cfg(test)]
mod degraded_storage_tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_storage_keeps_memory_state() {
        let storage = Arc::new(DisabledStorage::default());
        let store = AuthStore::new(AuthConfig::default(), storage.clone());

        store.initialize();
        assert_eq!(store.snapshot(), signed_out());
        assert!(store.persistence_degraded());

        assert!(store.login(PASSWORD).await);
        assert_eq!(store.snapshot(), admin());

        store.logout();
        assert_eq!(store.snapshot(), signed_out());
        assert!(storage.calls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn test_logout_with_failing_remove_does_not_resurrect_session() {
        let storage = Arc::new(StuckRemoveStorage::default());
        let store = AuthStore::new(AuthConfig::default(), storage.clone());
        store.initialize();
        assert!(store.login(PASSWORD).await);

        store.logout();
        assert_eq!(store.snapshot(), signed_out());
        assert!(store.persistence_degraded());

        let reloaded = AuthStore::new(AuthConfig::default(), storage.clone());
        reloaded.initialize();
        assert_eq!(reloaded.snapshot(), signed_out());
    }
}

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_see_changes_immediately() {
        let store = booted(&MemoryStorage::new());
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.login(PASSWORD).await;
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), admin());

        store.logout();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), signed_out());
    }

    #[test]
    fn test_initialize_clears_loading_for_subscribers() {
        let store = AuthStore::new(AuthConfig::default(), MemoryStorage::new());
        let rx = store.subscribe();
        assert!(rx.borrow().is_loading);

        store.initialize();
        assert!(!rx.borrow().is_loading);
    }
}

#[cfg(test)]
mod guard_flow_tests {
    use super::*;

    #[tokio::test]
    async fn test_guard_follows_store_lifecycle() {
        let guard = RouteGuard::default();
        let store = AuthStore::new(AuthConfig::default(), MemoryStorage::new());

        assert_eq!(guard.evaluate(&store.snapshot()).state(), GuardState::Checking);

        store.initialize();
        assert_eq!(guard.evaluate(&store.snapshot()).state(), GuardState::Denied);

        store.login(PASSWORD).await;
        assert_eq!(guard.evaluate(&store.snapshot()), GuardDecision::Allow);

        store.logout();
        assert_eq!(
            guard.evaluate(&store.snapshot()),
            GuardDecision::Redirect {
                to: "/admin/login".to_string(),
                replace: true,
            }
        );
    }

    #[tokio::test]
    async fn test_guard_uses_configured_login_path() {
        let config = AuthConfig::default().with_login_path("/staff/login");
        let guard = RouteGuard::new(config.login_path.clone());
        let store = AuthStore::new(config, MemoryStorage::new());
        store.initialize();

        assert_eq!(
            guard.evaluate(&store.snapshot()),
            GuardDecision::Redirect {
                to: "/staff/login".to_string(),
                replace: true,
            }
        );
    }
}
