//! Authentication module: session state and durable storage.
//!
//! This module provides:
//! - `SessionStore`: the single source of truth for "who is logged in",
//!   driving all state changes through a pure reducer
//! - `SessionVault`: durable storage for the token/refresh-token/user
//!   triple, with a keychain-backed implementation and an in-memory one
//!
//! The store serializes its operations, so interleaved login/logout from
//! different UI handlers resolve in a deterministic last-write-wins order.

pub mod state;
pub mod store;
pub mod vault;

pub use state::{AuthAction, AuthState};
pub use store::{AuthError, SessionStore};
pub use vault::{KeyringVault, MemoryVault, SessionVault, StoredSession};
