//! Auth state types: the persisted record and the observable snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// The record written to session storage after a successful login.
///
/// Encoded as `{"isAuthenticated":true,"isAdmin":true,"timestamp":<millis>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAuth {
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub is_admin: bool,
    /// Login time. Recorded only; sessions do not expire on it.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl PersistedAuth {
    /// Record for an admin login happening now.
    pub fn admin_login() -> Self {
        Self::admin_login_at(Utc::now())
    }

    pub fn admin_login_at(at: DateTime<Utc>) -> Self {
        Self {
            is_authenticated: true,
            is_admin: true,
            timestamp: Some(at),
        }
    }

    /// Record that rehydrates to the signed-out state.
    pub fn signed_out() -> Self {
        Self {
            is_authenticated: false,
            is_admin: false,
            timestamp: None,
        }
    }

    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decode a stored value. Anything other than a JSON object of this shape
    /// is an error, including a `timestamp` that is not integer milliseconds.
    pub fn decode(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Point-in-time view of the store, consumed by the route guard and header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthSnapshot {
    pub is_authenticated: bool,
    pub is_admin: bool,
    /// True until rehydration finishes, and while a login is being verified.
    pub is_loading: bool,
}

impl AuthSnapshot {
    /// State before `initialize` has run: nothing determined yet.
    pub fn booting() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// Authenticated with admin capability.
    pub fn is_authorized_admin(&self) -> bool {
        self.is_authenticated && self.is_admin
    }
}

impl From<PersistedAuth> for AuthSnapshot {
    fn from(record: PersistedAuth) -> Self {
        Self {
            is_authenticated: record.is_authenticated,
            is_admin: record.is_admin,
            is_loading: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_encode_uses_camel_case_and_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let encoded = PersistedAuth::admin_login_at(at).encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(value["isAuthenticated"], true);
        assert_eq!(value["isAdmin"], true);
        assert_eq!(value["timestamp"], 1_700_000_000_123_i64);
    }

    #[test]
    fn test_decode_tolerates_missing_fields() {
        let record = PersistedAuth::decode(r#"{"isAuthenticated":true}"#).unwrap();
        assert!(record.is_authenticated);
        assert!(!record.is_admin);
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        assert!(PersistedAuth::decode("not json").is_err());
        assert!(PersistedAuth::decode("null").is_err());
        assert!(PersistedAuth::decode("[true, true]").is_err());
        assert!(PersistedAuth::decode(r#"{"isAuthenticated":"yes"}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_non_integer_timestamp() {
        assert!(PersistedAuth::decode(r#"{"isAuthenticated":true,"timestamp":"2024-11-02"}"#).is_err());
    }

    #[test]
    fn test_signed_out_record_round_trips_to_default_snapshot() {
        let raw = PersistedAuth::signed_out().encode().unwrap();
        let snapshot = AuthSnapshot::from(PersistedAuth::decode(&raw).unwrap());
        assert_eq!(snapshot, AuthSnapshot::default());
    }

    #[test]
    fn test_snapshot_from_record() {
        let snapshot = AuthSnapshot::from(PersistedAuth::admin_login());
        assert!(snapshot.is_authorized_admin());
        assert!(!snapshot.is_loading);
    }

    #[test]
    fn test_booting_snapshot() {
        let snapshot = AuthSnapshot::booting();
        assert!(snapshot.is_loading);
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.is_admin);
    }
}
