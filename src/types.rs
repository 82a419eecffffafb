//! Common types and data structures

use crate::catalog::{derive_selections, SelectionVector};
use chrono::{DateTime, Local};

/// User record as returned by `GET /api/user/{id}`
///
/// All three fields are required; unknown fields are tolerated.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct UserProfile {
    pub nickname: String,
    pub email: String,
    /// Comma-separated catalog positions
    #[serde(rename = "crime")]
    pub crime_selections: String,
}

/// What the profile screen currently displays
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSnapshot {
    pub nickname: String,
    pub email: String,
    pub raw_selections: String,
    pub selections: SelectionVector,
    pub fetched_at: DateTime<Local>,
}

impl ProfileSnapshot {
    pub fn from_profile(profile: UserProfile, fetched_at: DateTime<Local>) -> Self {
        let selections = derive_selections(&profile.crime_selections);
        Self {
            nickname: profile.nickname,
            email: profile.email,
            raw_selections: profile.crime_selections,
            selections,
            fetched_at,
        }
    }
}

/// Fetch lifecycle of the profile screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed,
    NotAuthenticated,
}

/// Screens reachable from the profile tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Profile,
    ProfileEdit,
}

/// Which backend feeds the profile view
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    Live,
    Static,
}
