// src/routes.rs

use axum::{Router, http::Method, middleware, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{leaderboard, statistics},
    state::AppState,
    utils::jwt::auth_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (leaderboard, statistics).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool + Config).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        "http://localhost:3000".parse().unwrap(),
        "http://127.0.0.1:3000".parse().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    // Authentication is optional on every leaderboard route: the token only
    // determines whether the requester's own standing is resolved.
    let leaderboard_routes = Router::new()
        .route("/global", get(leaderboard::global_leaderboard))
        .route("/categories", get(leaderboard::category_overview))
        .route("/category/{category_id}", get(leaderboard::category_leaderboard))
        .route("/quiz/{quiz_id}", get(leaderboard::quiz_leaderboard))
        .route("/user/{user_id}", get(leaderboard::user_profile));

    let statistics_routes = Router::new()
        .route("/difficulty-stats", get(statistics::difficulty_stats))
        // Protected statistics routes
        .merge(
            Router::new()
                .route("/my-stats", get(statistics::my_stats))
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        );

    Router::new()
        .nest("/leaderboard", leaderboard_routes)
        .nest("/statistics", statistics_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
