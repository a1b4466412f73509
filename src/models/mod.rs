//! Data models for Sanad backend entities.
//!
//! This module contains the wire-level structures exchanged with the
//! backend:
//!
//! - `User` and the auth request/response shapes
//! - `Campaign` listings with embedded organization info
//! - `Donation` requests and records
//! - `Activity` feed entries
//!
//! All types (de)serialize with camelCase field names to match the API.

pub mod activity;
pub mod campaign;
pub mod donation;
pub mod user;

pub use activity::{Activity, ActivityCampaign, ActivityUser};
pub use campaign::{Campaign, CampaignCategory, Organization};
pub use donation::{Donation, DonationRequest};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User};
