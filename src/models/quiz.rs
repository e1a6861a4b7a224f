// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'quizzes' table in the database.
/// Each quiz belongs to exactly one category.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub quiz_id: i64,
    pub quiz_name: String,
    pub category_id: i64,
    pub question_count: i64,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}
