//! Route guard: decides what a protected route shows for a given snapshot.
//!
//! The guard keeps no state of its own. Each evaluation is a pure function of
//! the store snapshot it is handed.

use crate::config::DEFAULT_LOGIN_PATH;
use crate::state::AuthSnapshot;

/// What a protected route should do right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Auth state not yet determined. Show a neutral placeholder; do not
    /// render content and do not redirect.
    Checking,
    /// Render the protected subtree unchanged.
    Allow,
    /// Navigate to `to`. When `replace` is set the current history entry is
    /// replaced so back-navigation does not return to the blocked page.
    Redirect { to: String, replace: bool },
}

/// The three guard states.
///
/// `Checking` moves to `Allowed` or `Denied` once rehydration completes;
/// `Allowed` moves to `Denied` on logout and `Denied` to `Allowed` on a
/// successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Checking,
    Allowed,
    Denied,
}

impl GuardDecision {
    pub fn state(&self) -> GuardState {
        match self {
            Self::Checking => GuardState::Checking,
            Self::Allow => GuardState::Allowed,
            Self::Redirect { .. } => GuardState::Denied,
        }
    }
}

/// Guard bound to a login path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    login_path: String,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH)
    }
}

impl RouteGuard {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn evaluate(&self, snapshot: &AuthSnapshot) -> GuardDecision {
        if snapshot.is_loading {
            GuardDecision::Checking
        } else if snapshot.is_authorized_admin() {
            GuardDecision::Allow
        } else {
            GuardDecision::Redirect {
                to: self.login_path.clone(),
                replace: true,
            }
        }
    }
}

/// Evaluate with the default login path.
pub fn evaluate(snapshot: &AuthSnapshot) -> GuardDecision {
    RouteGuard::default().evaluate(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(is_authenticated: bool, is_admin: bool, is_loading: bool) -> AuthSnapshot {
        AuthSnapshot {
            is_authenticated,
            is_admin,
            is_loading,
        }
    }

    #[test]
    fn test_loading_always_checks() {
        for auth in [false, true] {
            for admin in [false, true] {
                assert_eq!(
                    evaluate(&snapshot(auth, admin, true)),
                    GuardDecision::Checking
                );
            }
        }
    }

    #[test]
    fn test_unauthenticated_redirects_with_replace() {
        assert_eq!(
            evaluate(&snapshot(false, false, false)),
            GuardDecision::Redirect {
                to: "/admin/login".to_string(),
                replace: true,
            }
        );
    }

    #[test]
    fn test_authenticated_without_admin_is_denied() {
        assert_eq!(
            evaluate(&snapshot(true, false, false)).state(),
            GuardState::Denied
        );
        assert_eq!(
            evaluate(&snapshot(false, true, false)).state(),
            GuardState::Denied
        );
    }

    #[test]
    fn test_admin_allowed() {
        assert_eq!(evaluate(&snapshot(true, true, false)), GuardDecision::Allow);
    }

    #[test]
    fn test_custom_login_path() {
        let guard = RouteGuard::new("/login");
        match guard.evaluate(&snapshot(false, false, false)) {
            GuardDecision::Redirect { to, .. } => assert_eq!(to, "/login"),
            other => panic!("expected redirect, got {other:?}"),
        }
    }
}
