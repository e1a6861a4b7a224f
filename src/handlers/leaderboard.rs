// src/handlers/leaderboard.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    models::{
        category::Category,
        leaderboard::{CategoryStat, QuizAttemptRow, RankedRow, RecentAttempt, UserRank},
        quiz::Quiz,
        user::User,
    },
    ranking,
    state::AppState,
    utils::jwt::OptionalClaims,
};

/// Query parameters shared by the windowed leaderboard endpoints.
///
/// `limit` is kept as a raw string: a mangled value must fall back to the
/// default window instead of rejecting the request.
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<String>,
}

fn parse_id(raw: &str, what: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {} id", what)))
}

/// Global leaderboard across all quizzes.
///
/// Scores come from the precomputed `users.total_score`; users with no
/// attempts still appear with their (zero) score. Ordered by score with
/// ascending user id as the tie-break.
pub async fn global_leaderboard(
    State(state): State<AppState>,
    OptionalClaims(claims): OptionalClaims,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = ranking::clamp_limit(params.limit.as_deref());
    let requester = claims.and_then(|c| c.user_id());

    let rows: Vec<RankedRow> = sqlx::query_as(
        r#"
        SELECT
            u.user_id,
            u.username,
            u.total_score AS score,
            COUNT(DISTINCT qa.quiz_id) AS quizzes_completed
        FROM users u
        LEFT JOIN quiz_attempts qa ON qa.user_id = u.user_id
        WHERE u.user_id <> ?
        GROUP BY u.user_id
        ORDER BY u.total_score DESC, u.user_id ASC
        "#,
    )
    .bind(state.config.system_account_id)
    .fetch_all(&state.pool)
    .await?;

    let (leaderboard, current_user) = ranking::rank_and_window(rows, limit, requester);

    Ok(Json(serde_json::json!({
        "type": "global",
        "leaderboard": leaderboard,
        "currentUser": current_user,
    })))
}

/// Full ranked sequence for one category: per-user attempt-score sums,
/// ordered by sum, then earliest completion, then user id.
async fn category_rows(
    pool: &SqlitePool,
    category_id: i64,
    system_account_id: i64,
) -> Result<Vec<RankedRow>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT
            u.user_id,
            u.username,
            SUM(qa.score) AS score,
            COUNT(qa.attempt_id) AS quizzes_completed
        FROM users u
        JOIN quiz_attempts qa ON qa.user_id = u.user_id
        JOIN quizzes q ON q.quiz_id = qa.quiz_id
        WHERE q.category_id = ? AND u.user_id <> ?
        GROUP BY u.user_id
        ORDER BY score DESC, MIN(qa.finished_at) ASC, u.user_id ASC
        "#,
    )
    .bind(category_id)
    .bind(system_account_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Leaderboard for a single category.
pub async fn category_leaderboard(
    State(state): State<AppState>,
    OptionalClaims(claims): OptionalClaims,
    Path(category_id): Path<String>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let category_id = parse_id(&category_id, "category")?;
    let limit = ranking::clamp_limit(params.limit.as_deref());
    let requester = claims.and_then(|c| c.user_id());

    let category: Category =
        sqlx::query_as("SELECT category_id, category_name FROM categories WHERE category_id = ?")
            .bind(category_id)
            .fetch_optional(&state.pool)
            .await?
            .ok_or(AppError::NotFound("Category not found".to_string()))?;

    let rows = category_rows(&state.pool, category_id, state.config.system_account_id).await?;
    let (leaderboard, current_user) = ranking::rank_and_window(rows, limit, requester);

    Ok(Json(serde_json::json!({
        "type": "category",
        "category_id": category.category_id,
        "category_name": category.category_name,
        "leaderboard": leaderboard,
        "currentUser": current_user,
    })))
}

/// Leaderboard for a single quiz.
///
/// Users may attempt a quiz more than once; ranking uses each user's best
/// attempt, with the earliest completion winning among equal bests.
pub async fn quiz_leaderboard(
    State(state): State<AppState>,
    OptionalClaims(claims): OptionalClaims,
    Path(quiz_id): Path<String>,
    Query(params): Query<LeaderboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let quiz_id = parse_id(&quiz_id, "quiz")?;
    let limit = ranking::clamp_limit(params.limit.as_deref());
    let requester = claims.and_then(|c| c.user_id());

    let quiz: Quiz = sqlx::query_as(
        "SELECT quiz_id, quiz_name, category_id, question_count, created_at FROM quizzes WHERE quiz_id = ?",
    )
    .bind(quiz_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("Quiz not found".to_string()))?;

    let attempts: Vec<QuizAttemptRow> = sqlx::query_as(
        r#"
        SELECT
            u.user_id,
            u.username,
            qa.score,
            qa.finished_at
        FROM quiz_attempts qa
        JOIN users u ON u.user_id = qa.user_id
        WHERE qa.quiz_id = ? AND u.user_id <> ?
        ORDER BY qa.score DESC, qa.finished_at ASC, u.user_id ASC
        "#,
    )
    .bind(quiz_id)
    .bind(state.config.system_account_id)
    .fetch_all(&state.pool)
    .await?;

    let rows = ranking::best_attempt_per_user(attempts);
    let (leaderboard, current_user) = ranking::rank_and_window(rows, limit, requester);

    Ok(Json(serde_json::json!({
        "type": "quiz",
        "quiz_id": quiz.quiz_id,
        "quiz_name": quiz.quiz_name,
        "leaderboard": leaderboard,
        "currentUser": current_user,
    })))
}

/// Overview of every category: the top three entries each, plus the
/// requester's own rank and score per category when authenticated. The
/// limit parameter has no effect here.
pub async fn category_overview(
    State(state): State<AppState>,
    OptionalClaims(claims): OptionalClaims,
) -> Result<impl IntoResponse, AppError> {
    let requester = claims.and_then(|c| c.user_id());

    let categories: Vec<Category> = sqlx::query_as(
        "SELECT category_id, category_name FROM categories ORDER BY category_name ASC, category_id ASC",
    )
    .fetch_all(&state.pool)
    .await?;

    let mut result = Vec::with_capacity(categories.len());

    for category in categories {
        let rows = category_rows(
            &state.pool,
            category.category_id,
            state.config.system_account_id,
        )
        .await?;
        let entries = ranking::assign_ranks(rows);

        let user_rank = requester.and_then(|user_id| {
            entries
                .iter()
                .find(|entry| entry.user_id == user_id)
                .map(|entry| UserRank {
                    rank: entry.rank,
                    score: entry.score,
                })
        });

        let top_users: Vec<_> = entries.into_iter().take(ranking::OVERVIEW_TOP_N).collect();

        result.push(serde_json::json!({
            "category_id": category.category_id,
            "category_name": category.category_name,
            "top_users": top_users,
            "user_rank": user_rank,
        }));
    }

    Ok(Json(serde_json::json!({ "categories": result })))
}

/// One user's profile: precomputed global standing, per-category aggregates
/// and the ten most recent attempts.
pub async fn user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_id(&user_id, "user")?;

    let user: User = sqlx::query_as(
        "SELECT user_id, username, total_score, rank, created_at FROM users WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_optional(&state.pool)
    .await?
    .ok_or(AppError::NotFound("User not found".to_string()))?;

    // Every category keeps a row; null aggregates mean the user never
    // played it. NULL sorts last under DESC in SQLite.
    let category_stats: Vec<CategoryStat> = sqlx::query_as(
        r#"
        SELECT
            c.category_id,
            c.category_name,
            SUM(qa.score) AS total_score,
            COUNT(qa.attempt_id) AS quizzes_completed,
            AVG(qa.score) AS avg_score,
            MAX(qa.score) AS best_score
        FROM categories c
        LEFT JOIN quizzes q ON q.category_id = c.category_id
        LEFT JOIN quiz_attempts qa ON qa.quiz_id = q.quiz_id AND qa.user_id = ?
        GROUP BY c.category_id
        ORDER BY total_score DESC, c.category_id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    let recent_attempts: Vec<RecentAttempt> = sqlx::query_as(
        r#"
        SELECT
            q.quiz_id,
            q.quiz_name,
            c.category_name,
            qa.score,
            qa.finished_at
        FROM quiz_attempts qa
        JOIN quizzes q ON q.quiz_id = qa.quiz_id
        JOIN categories c ON c.category_id = q.category_id
        WHERE qa.user_id = ?
        ORDER BY qa.finished_at DESC, qa.attempt_id DESC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(serde_json::json!({
        "user": {
            "user_id": user.user_id,
            "username": user.username,
            "total_score": user.total_score,
            "global_rank": user.rank,
        },
        "category_stats": category_stats,
        "recent_attempts": recent_attempts,
    })))
}
