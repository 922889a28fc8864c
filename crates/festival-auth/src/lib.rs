//! # festival-auth
//!
//! Client-side admin session gate for the festival chat UI.
//!
//! - [`AuthStore`] holds `(is_authenticated, is_admin, is_loading)`, mirrors
//!   it to session storage, and exposes `initialize`, `login` and `logout`.
//! - [`RouteGuard`] turns a store snapshot into a render/redirect decision.
//!
//! The password check happens entirely on the client against a configured
//! value. It is a placeholder gate, not a credential system.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use festival_auth::{AuthConfig, AuthStore, MemoryStorage, RouteGuard, GuardDecision};
//!
//! let store = AuthStore::new(AuthConfig::default(), MemoryStorage::new());
//! store.initialize();
//!
//! let guard = RouteGuard::default();
//! assert!(matches!(guard.evaluate(&store.snapshot()), GuardDecision::Redirect { .. }));
//!
//! assert!(store.login("admin123").await);
//! assert_eq!(guard.evaluate(&store.snapshot()), GuardDecision::Allow);
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod guard;
pub mod state;
pub mod storage;
pub mod store;

pub use config::AuthConfig;
pub use error::{Error, Result, StorageError, StorageResult};
pub use guard::{GuardDecision, GuardState, RouteGuard};
pub use state::{AuthSnapshot, PersistedAuth};
pub use storage::{MemoryStorage, SessionStorage};
pub use store::AuthStore;
