//! User model for storage and API.

use serde::{Deserialize, Serialize};

use crate::services::google::GoogleProfile;

/// User record stored in Firestore, keyed by Google subject ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Google subject ID (also used as document ID); immutable after creation
    pub google_id: String,
    /// Email address; the provider is the source of truth on every login
    pub email: String,
    /// Display name
    pub name: String,
    /// Profile picture URL
    pub photo: Option<String>,
    /// Highest score ever accepted; never decreases
    pub best_score: u32,
    /// Consecutive-day play counter
    pub streak: u32,
    /// Calendar date (`YYYY-MM-DD`) of the last streak-advancing play
    pub last_played: Option<String>,
    /// When user first logged in
    pub created_at: String,
    /// Last login timestamp
    pub last_login: String,
}

impl User {
    /// Create a fresh record for a first-time login.
    pub fn from_profile(profile: &GoogleProfile, now: &str) -> Self {
        Self {
            google_id: profile.id.clone(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            photo: profile.picture.clone(),
            best_score: 0,
            streak: 0,
            last_played: None,
            created_at: now.to_string(),
            last_login: now.to_string(),
        }
    }

    /// Refresh provider-owned fields on a repeat login.
    ///
    /// Progress fields (best_score, streak, last_played) are untouched.
    pub fn refresh_profile(&mut self, profile: &GoogleProfile, now: &str) {
        self.email = profile.email.clone();
        self.name = profile.name.clone();
        self.photo = profile.picture.clone();
        self.last_login = now.to_string();
    }
}
