// tests/statistics_tests.rs

use quizboard::{config::Config, routes, state::AppState, utils::jwt::sign_jwt};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

const TEST_SECRET: &str = "statistics_test_secret";

async fn spawn_app() -> (String, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        rust_log: "error".to_string(),
        system_account_id: 4,
        port: 0,
    };

    let state = AppState {
        pool: pool.clone(),
        config,
    };

    let app = routes::create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (address, pool)
}

async fn seed_play_data(pool: &SqlitePool) {
    sqlx::query("INSERT INTO users (user_id, username) VALUES (1, 'alice'), (2, 'bob')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO categories (category_id, category_name) VALUES (1, 'History')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO quiz_difficulties (id, difficulty) VALUES (1, 'Easy'), (2, 'Hard')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO quizzes (quiz_id, quiz_name, category_id, difficulty_id, question_count)
         VALUES (1, 'Ancient Rome', 1, 1, 10), (2, 'Middle Ages', 1, 1, 8)",
    )
    .execute(pool)
    .await
    .unwrap();
}

async fn seed_attempt(pool: &SqlitePool, user_id: i64, quiz_id: i64, score: i64, finished_at: &str) {
    sqlx::query(
        "INSERT INTO quiz_attempts (user_id, quiz_id, score, finished_at) VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(quiz_id)
    .bind(score)
    .bind(finished_at)
    .execute(pool)
    .await
    .unwrap();
}

#[tokio::test]
async fn my_stats_requires_authentication() {
    let (address, _pool) = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/statistics/my-stats", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["kind"], "unauthorized");
}

#[tokio::test]
async fn my_stats_returns_own_history_oldest_first() {
    // Arrange
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    seed_play_data(&pool).await;

    // Seeded out of order; bob's attempt must not leak into alice's stats.
    seed_attempt(&pool, 1, 2, 40, "2026-05-02T10:00:00Z").await;
    seed_attempt(&pool, 1, 1, 80, "2026-05-01T10:00:00Z").await;
    seed_attempt(&pool, 2, 1, 99, "2026-05-03T10:00:00Z").await;

    let token = sign_jwt(1, "user", TEST_SECRET, 600).unwrap();

    // Act
    let response = client
        .get(&format!("{}/statistics/my-stats", address))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let stats: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(stats.len(), 2);

    assert_eq!(stats[0]["quiz_name"], "Ancient Rome");
    assert_eq!(stats[0]["your_score"], 80);
    assert_eq!(stats[0]["total_questions"], 10);
    assert_eq!(stats[0]["category_name"], "History");

    assert_eq!(stats[1]["quiz_name"], "Middle Ages");
    assert_eq!(stats[1]["your_score"], 40);
    assert_eq!(stats[1]["total_questions"], 8);
}

#[tokio::test]
async fn difficulty_stats_counts_quizzes_per_label() {
    // Arrange
    let (address, pool) = spawn_app().await;
    let client = reqwest::Client::new();
    seed_play_data(&pool).await;

    // Act: public endpoint, no token.
    let response = client
        .get(&format!("{}/statistics/difficulty-stats", address))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let stats: Vec<serde_json::Value> = response.json().await.unwrap();
    assert_eq!(stats.len(), 2);

    assert_eq!(stats[0]["label"], "Easy");
    assert_eq!(stats[0]["count"], 2);
    assert_eq!(stats[1]["label"], "Hard");
    assert_eq!(stats[1]["count"], 0);
}
