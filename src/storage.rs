//! Browser session storage

use festival_auth::{SessionStorage, StorageError, StorageResult};
use gloo_storage::{SessionStorage as GlooSession, Storage};

/// Key of the visitor's chat session id
const CHAT_SESSION_KEY: &str = "festival_chat_session";

/// `window.sessionStorage`, looked up on every call.
///
/// Holds no JS handle, so it is `Send + Sync` and can sit inside the auth
/// store. When storage is disabled every call returns
/// [`StorageError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSessionStorage;

impl BrowserSessionStorage {
    fn handle() -> StorageResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".into()))?
            .session_storage()
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StorageError::Unavailable("sessionStorage is disabled".into()))
    }
}

impl SessionStorage for BrowserSessionStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::handle()?
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::handle()?
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        Self::handle()?
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// Chat session id remembered for this tab, if any.
pub fn saved_chat_session() -> Option<String> {
    GlooSession::get(CHAT_SESSION_KEY).ok()
}

pub fn save_chat_session(session_id: &str) {
    if let Err(e) = GlooSession::set(CHAT_SESSION_KEY, session_id) {
        tracing::warn!("Failed to remember chat session: {}", e);
    }
}

pub fn forget_chat_session() {
    GlooSession::delete(CHAT_SESSION_KEY);
}
