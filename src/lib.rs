//! Client core for the Sanad donation app.
//!
//! This crate holds everything the app's screens link against to talk to the
//! Sanad backend:
//!
//! - `SessionStore`: the authentication state machine (login, register,
//!   logout, restore-from-storage)
//! - `ApiClient`: the sole network boundary, a reqwest wrapper that injects
//!   a bearer token into every request
//! - `SessionVault`: durable storage for the token/user triple, backed by
//!   the OS keychain in production and an in-memory slot in tests
//! - Typed models for campaigns, donations, activities, and users
//!
//! UI, navigation, and rendering live in the app shell, not here.

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, AuthState, SessionStore};
pub use config::Config;
