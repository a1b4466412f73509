//! HTTP client module for the Sanad backend API.
//!
//! This module provides the `ApiClient` for communicating with the backend
//! to authenticate, list campaigns, create donations, and fetch the recent
//! activity feed.
//!
//! The API uses JWT bearer token authentication obtained through the
//! `/auth/login` and `/auth/register` endpoints.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
