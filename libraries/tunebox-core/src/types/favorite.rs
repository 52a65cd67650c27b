/// Favorite relation between a user and a song
use crate::types::{FavoriteId, SongId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a favorite record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteStatus {
    Active,
    Removed,
}

impl FavoriteStatus {
    /// Convert status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteStatus::Active => "active",
            FavoriteStatus::Removed => "removed",
        }
    }

    /// Parse status from its stored form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(FavoriteStatus::Active),
            "removed" => Some(FavoriteStatus::Removed),
            _ => None,
        }
    }
}

/// A user's favorite mark on a song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub song_id: SongId,
    pub status: FavoriteStatus,
    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn is_active(&self) -> bool {
        self.status == FavoriteStatus::Active
    }
}
