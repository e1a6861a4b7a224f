// src/handlers/statistics.rs

use axum::{Extension, Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::stats::{DifficultyStat, PersonalStat},
    utils::jwt::Claims,
};

/// Personal attempt history for the logged-in user, oldest first.
/// Requires authentication; mounted behind the auth middleware.
pub async fn my_stats(
    State(pool): State<SqlitePool>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.sub.parse::<i64>().unwrap_or(0);

    let stats: Vec<PersonalStat> = sqlx::query_as(
        r#"
        SELECT
            q.quiz_name,
            c.category_name,
            qa.score AS your_score,
            q.question_count AS total_questions,
            qa.finished_at
        FROM quiz_attempts qa
        JOIN quizzes q ON q.quiz_id = qa.quiz_id
        JOIN categories c ON c.category_id = q.category_id
        WHERE qa.user_id = ?
        ORDER BY qa.finished_at ASC, qa.attempt_id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(stats))
}

/// How many quizzes exist per difficulty label.
/// Difficulties with no quizzes are reported with a zero count.
pub async fn difficulty_stats(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let stats: Vec<DifficultyStat> = sqlx::query_as(
        r#"
        SELECT d.difficulty AS label, COUNT(q.quiz_id) AS count
        FROM quiz_difficulties d
        LEFT JOIN quizzes q ON q.difficulty_id = d.id
        GROUP BY d.id
        ORDER BY d.id ASC
        "#,
    )
    .fetch_all(&pool)
    .await?;

    Ok(Json(stats))
}
