// src/models/leaderboard.rs

use serde::Serialize;
use sqlx::FromRow;

/// One row of a ranked leaderboard. Derived per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub username: String,
    pub score: i64,
    pub quizzes_completed: i64,
    pub rank: i64,
}

/// An aggregated, not-yet-ranked row as fetched from the store.
///
/// Rows must arrive in final leaderboard order: the ranking routine assigns
/// positions but never re-sorts.
#[derive(Debug, Clone, FromRow)]
pub struct RankedRow {
    pub user_id: i64,
    pub username: String,
    pub score: i64,
    pub quizzes_completed: i64,
}

/// A single attempt row for the quiz scope, before per-user aggregation.
#[derive(Debug, Clone, FromRow)]
pub struct QuizAttemptRow {
    pub user_id: i64,
    pub username: String,
    pub score: i64,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

/// The requester's standing within one category, shown on the overview
/// regardless of whether they made the top three.
#[derive(Debug, Clone, Serialize)]
pub struct UserRank {
    pub rank: i64,
    pub score: i64,
}

/// Per-category aggregate statistics for one user's profile.
/// A category the user never played keeps its row with null aggregates.
#[derive(Debug, FromRow, Serialize)]
pub struct CategoryStat {
    pub category_id: i64,
    pub category_name: String,
    pub total_score: Option<i64>,
    pub quizzes_completed: i64,
    pub avg_score: Option<f64>,
    pub best_score: Option<i64>,
}

/// One of a user's most recent attempts, joined with quiz and category names.
#[derive(Debug, FromRow, Serialize)]
pub struct RecentAttempt {
    pub quiz_id: i64,
    pub quiz_name: String,
    pub category_name: String,
    pub score: i64,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}
