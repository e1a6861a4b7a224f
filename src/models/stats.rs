// src/models/stats.rs

use serde::Serialize;
use sqlx::FromRow;

/// One attempt in the caller's personal history, oldest first so the
/// frontend can chart progression chronologically.
#[derive(Debug, FromRow, Serialize)]
pub struct PersonalStat {
    pub quiz_name: String,
    pub category_name: String,
    pub your_score: i64,
    pub total_questions: i64,
    pub finished_at: chrono::DateTime<chrono::Utc>,
}

/// Quiz count per difficulty label.
#[derive(Debug, FromRow, Serialize)]
pub struct DifficultyStat {
    pub label: String,
    pub count: i64,
}
