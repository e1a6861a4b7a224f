// src/models/category.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'categories' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
}
