//! The session store: single source of truth for "who is logged in".
//!
//! Four operations drive the state machine: `restore`, `login`, `register`,
//! and `logout`. Only `login` and `register` can surface an error to the
//! caller; `restore` and `logout` always succeed from the caller's point of
//! view, logging anything that goes wrong internally.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, User};

use super::state::{reduce, AuthAction, AuthState};
use super::vault::{SessionVault, StoredSession};

/// Errors surfaced by `login` and `register`.
#[derive(Error, Debug)]
pub enum AuthError {
    /// A precondition failed before any network call was made.
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Owns the `AuthState` and the only code paths that mutate it.
///
/// Operations are serialized through an internal mutex, so a login racing a
/// logout resolves in completion order with no interleaved half-states. The
/// state itself sits behind a read-write lock so screens can snapshot it
/// cheaply at any time.
pub struct SessionStore {
    api: ApiClient,
    vault: Arc<dyn SessionVault>,
    state: RwLock<AuthState>,
    op: Mutex<()>,
}

impl SessionStore {
    pub fn new(api: ApiClient, vault: Arc<dyn SessionVault>) -> Self {
        Self {
            api,
            vault,
            state: RwLock::new(AuthState::default()),
            op: Mutex::new(()),
        }
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.is_authenticated
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    async fn dispatch(&self, action: AuthAction) {
        let mut state = self.state.write().await;
        *state = reduce(state.clone(), action);
    }

    // Vault implementations block on OS keychain calls, so they run on the
    // blocking pool rather than stalling the reactor while the op mutex is
    // held.

    async fn vault_load(&self) -> anyhow::Result<Option<StoredSession>> {
        let vault = Arc::clone(&self.vault);
        tokio::task::spawn_blocking(move || vault.load())
            .await
            .unwrap_or_else(|e| Err(anyhow::anyhow!("vault task failed: {e}")))
    }

    async fn vault_store(&self, record: StoredSession) -> anyhow::Result<()> {
        let vault = Arc::clone(&self.vault);
        tokio::task::spawn_blocking(move || vault.store(&record))
            .await
            .unwrap_or_else(|e| Err(anyhow::anyhow!("vault task failed: {e}")))
    }

    async fn vault_clear(&self) -> anyhow::Result<()> {
        let vault = Arc::clone(&self.vault);
        tokio::task::spawn_blocking(move || vault.clear())
            .await
            .unwrap_or_else(|e| Err(anyhow::anyhow!("vault task failed: {e}")))
    }

    /// Restore the session from durable storage at process start.
    ///
    /// Trusts local storage without verifying the token against the
    /// backend. Never fails the caller: any storage error leaves the state
    /// unauthenticated with `is_loading` cleared.
    pub async fn restore(&self) {
        let _guard = self.op.lock().await;
        self.dispatch(AuthAction::SetLoading(true)).await;

        match self.vault_load().await {
            Ok(Some(session)) => {
                self.api.set_token(Some(session.access_token.clone())).await;
                debug!(email = %session.user.email, "session restored from vault");
                self.dispatch(AuthAction::LoginSuccess {
                    user: session.user,
                    access_token: session.access_token,
                    refresh_token: session.refresh_token,
                })
                .await;
            }
            Ok(None) => {
                self.dispatch(AuthAction::SetLoading(false)).await;
            }
            Err(error) => {
                warn!(%error, "failed to read stored session");
                self.dispatch(AuthAction::SetLoading(false)).await;
            }
        }
    }

    /// Authenticate with email and password.
    ///
    /// The email is trimmed and lower-cased before the request. On failure
    /// the identity fields are left untouched and the error is returned for
    /// the UI to display; there is no retry.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "email and password are required".into(),
            ));
        }

        let _guard = self.op.lock().await;
        self.dispatch(AuthAction::SetLoading(true)).await;

        let request = LoginRequest {
            email,
            password: password.to_string(),
        };
        match self.api.login(&request).await {
            Ok(response) => {
                self.install(response).await;
                Ok(())
            }
            Err(error) => {
                self.dispatch(AuthAction::SetLoading(false)).await;
                Err(error.into())
            }
        }
    }

    /// Create an account and authenticate in one step; success is
    /// indistinguishable in shape from `login`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AuthError> {
        let name = name.trim().to_string();
        let email = normalize_email(email);
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "name, email and password are required".into(),
            ));
        }

        let _guard = self.op.lock().await;
        self.dispatch(AuthAction::SetLoading(true)).await;

        let request = RegisterRequest {
            name,
            email,
            password: password.to_string(),
        };
        match self.api.register(&request).await {
            Ok(response) => {
                self.install(response).await;
                Ok(())
            }
            Err(error) => {
                self.dispatch(AuthAction::SetLoading(false)).await;
                Err(error.into())
            }
        }
    }

    /// Persist the triple, install the token, then mark authenticated.
    ///
    /// A storage failure is logged and swallowed: the session still works
    /// for this process run, it just will not survive a restart.
    async fn install(&self, response: AuthResponse) {
        let record = StoredSession {
            access_token: response.token.clone(),
            refresh_token: response.refresh_token.clone(),
            user: response.user.clone(),
        };
        if let Err(error) = self.vault_store(record).await {
            warn!(%error, "failed to persist session");
        }

        self.api.set_token(Some(response.token.clone())).await;
        self.dispatch(AuthAction::LoginSuccess {
            user: response.user,
            access_token: response.token,
            refresh_token: response.refresh_token,
        })
        .await;
    }

    /// Log out locally, with a best-effort remote logout first.
    ///
    /// Cannot fail: a failed remote call or storage clear is logged and the
    /// local logout proceeds regardless.
    pub async fn logout(&self) {
        let _guard = self.op.lock().await;

        if self.api.token().await.is_some() {
            if let Err(error) = self.api.logout().await {
                warn!(%error, "remote logout failed, clearing local session anyway");
            }
        }

        if let Err(error) = self.vault_clear().await {
            warn!(%error, "failed to clear stored session");
        }
        self.api.set_token(None).await;
        self.dispatch(AuthAction::Logout).await;
    }

    /// Replace the user record in place (e.g. refreshed donation totals).
    /// Tokens and durable storage are untouched.
    pub async fn update_user(&self, user: User) {
        self.dispatch(AuthAction::UpdateUser(user)).await;
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
        assert_eq!(normalize_email("a@x.com"), "a@x.com");
        assert_eq!(normalize_email("   "), "");
    }
}
