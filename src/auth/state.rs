use serde::{Deserialize, Serialize};

use crate::models::User;

/// Authentication state for the lifetime of the process.
///
/// Two invariants hold for every reachable state:
/// - `is_authenticated` implies `user` and `access_token` are both present
/// - `!is_authenticated` implies all three identity fields are absent
///
/// `is_loading` is a separate axis: it distinguishes "not yet known"
/// (startup, before `restore` completes) from "confirmed unauthenticated".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub user: Option<User>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
    pub is_loading: bool,
}

impl Default for AuthState {
    /// The process-start state: unauthenticated, restore still pending.
    fn default() -> Self {
        Self {
            user: None,
            access_token: None,
            refresh_token: None,
            is_authenticated: false,
            is_loading: true,
        }
    }
}

/// The four transitions the session state machine supports.
#[derive(Debug, Clone)]
pub enum AuthAction {
    SetLoading(bool),
    LoginSuccess {
        user: User,
        access_token: String,
        refresh_token: String,
    },
    Logout,
    UpdateUser(User),
}

/// Pure transition function; the only writer of `AuthState`.
pub fn reduce(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::SetLoading(is_loading) => AuthState { is_loading, ..state },
        AuthAction::LoginSuccess {
            user,
            access_token,
            refresh_token,
        } => AuthState {
            user: Some(user),
            access_token: Some(access_token),
            refresh_token: Some(refresh_token),
            is_authenticated: true,
            is_loading: false,
        },
        // Identity fields clear as a set, never independently
        AuthAction::Logout => AuthState {
            is_loading: false,
            ..AuthState::default()
        },
        // Only meaningful with a live session; a stray update after logout
        // must not resurrect an identity field
        AuthAction::UpdateUser(user) => {
            if state.is_authenticated {
                AuthState {
                    user: Some(user),
                    ..state
                }
            } else {
                state
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_user() -> User {
        User {
            id: "u1".into(),
            name: "Ana".into(),
            email: "a@x.com".into(),
            photo_url: None,
            total_donated: 0.0,
            donations_count: 0,
        }
    }

    fn logged_in() -> AuthState {
        reduce(
            AuthState::default(),
            AuthAction::LoginSuccess {
                user: some_user(),
                access_token: "tok".into(),
                refresh_token: "ref".into(),
            },
        )
    }

    /// `is_authenticated == true` iff user and access token are present.
    fn assert_invariants(state: &AuthState) {
        if state.is_authenticated {
            assert!(state.user.is_some());
            assert!(state.access_token.is_some());
        } else {
            assert!(state.user.is_none());
            assert!(state.access_token.is_none());
            assert!(state.refresh_token.is_none());
        }
    }

    #[test]
    fn test_initial_state_is_unauthenticated_and_loading() {
        let state = AuthState::default();
        assert!(!state.is_authenticated);
        assert!(state.is_loading);
        assert_invariants(&state);
    }

    #[test]
    fn test_login_success_sets_identity_and_clears_loading() {
        let state = logged_in();
        assert!(state.is_authenticated);
        assert!(!state.is_loading);
        assert_eq!(state.access_token.as_deref(), Some("tok"));
        assert_eq!(state.refresh_token.as_deref(), Some("ref"));
        assert_invariants(&state);
    }

    #[test]
    fn test_logout_clears_all_identity_fields_atomically() {
        let state = reduce(logged_in(), AuthAction::Logout);
        assert!(!state.is_authenticated);
        assert!(!state.is_loading);
        assert_invariants(&state);
    }

    #[test]
    fn test_set_loading_preserves_identity() {
        let state = reduce(logged_in(), AuthAction::SetLoading(true));
        assert!(state.is_loading);
        assert!(state.is_authenticated);
        assert_eq!(state.user.as_ref().map(|u| u.name.as_str()), Some("Ana"));
        assert_invariants(&state);
    }

    #[test]
    fn test_update_user_is_ignored_while_unauthenticated() {
        let state = reduce(
            reduce(logged_in(), AuthAction::Logout),
            AuthAction::UpdateUser(some_user()),
        );
        assert!(!state.is_authenticated);
        assert!(state.user.is_none());
        assert_invariants(&state);
    }

    #[test]
    fn test_update_user_leaves_tokens_untouched() {
        let mut updated = some_user();
        updated.total_donated = 25.0;
        updated.donations_count = 1;

        let state = reduce(logged_in(), AuthAction::UpdateUser(updated));
        assert_eq!(state.user.as_ref().map(|u| u.donations_count), Some(1));
        assert_eq!(state.access_token.as_deref(), Some("tok"));
        assert_invariants(&state);
    }
}
