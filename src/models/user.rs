// src/models/user.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'users' table in the database.
///
/// `total_score` and `rank` are precomputed by the quiz-attempt-recording
/// subsystem: total_score is the sum of the user's attempt scores, rank a
/// dense ordering by total_score descending with ties broken by ascending
/// user_id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,

    /// Unique username.
    pub username: String,

    pub total_score: i64,

    pub rank: i64,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
