//! Application state shared through Leptos context

use std::sync::Arc;

use festival_auth::{AuthSnapshot, AuthStore, RouteGuard};
use leptos::prelude::*;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::storage::BrowserSessionStorage;

/// Reactive view of the auth store.
///
/// The store is the source of truth; `snapshot` mirrors it after every
/// operation so components re-render without polling.
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<AuthStore>,
    guard: RouteGuard,
    /// Current `(is_authenticated, is_admin, is_loading)`.
    pub snapshot: RwSignal<AuthSnapshot>,
}

impl AuthContext {
    pub fn new(store: AuthStore) -> Self {
        let guard = RouteGuard::new(store.config().login_path.clone());
        let snapshot = RwSignal::new(store.snapshot());
        Self {
            store: Arc::new(store),
            guard,
            snapshot,
        }
    }

    /// Rehydrate from session storage.
    pub fn initialize(&self) {
        self.store.initialize();
        self.sync();
    }

    pub async fn login(&self, password: &str) -> bool {
        self.snapshot.update(|s| s.is_loading = true);
        let ok = self.store.login(password).await;
        self.sync();
        ok
    }

    pub fn logout(&self) {
        self.store.logout();
        self.sync();
    }

    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    fn sync(&self) {
        self.snapshot.set(self.store.snapshot());
    }
}

/// Auth context for the current component tree.
///
/// # Panics
///
/// Panics when called outside the tree set up by [`App`](crate::App).
pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// Global application state
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// Backend client
    pub api: ApiClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let api = config.api_client();
        Self { config, api }
    }

    /// Build the auth context for this configuration.
    pub fn auth_context(&self) -> AuthContext {
        let store = AuthStore::new(self.config.auth_config(), BrowserSessionStorage);
        AuthContext::new(store)
    }
}
