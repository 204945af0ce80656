use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

mod auth;
mod config;
mod database;
mod error;
mod handlers;
mod middleware;
mod services;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = crate::config::config();
    tracing::info!("Starting Huddle API in {:?} mode", config.environment);

    // Fail fast when the database is unreachable or the schema can't be applied
    let pool = database::DatabaseManager::pool()
        .await
        .unwrap_or_else(|e| panic!("database unavailable: {}", e));
    database::migrations::run(&pool)
        .await
        .unwrap_or_else(|e| panic!("migrations failed: {}", e));

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("HUDDLE_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Huddle API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(user_routes())
        // Protected API
        .merge(workspace_routes())
        .merge(channel_routes())
        .merge(dm_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn user_routes() -> Router {
    use axum::routing::post;
    use handlers::user;

    Router::new()
        .route("/api/user/sign_up", post(user::sign_up))
        .route("/api/user/login", post(user::login))
}

fn workspace_routes() -> Router {
    use axum::routing::{delete, post};
    use handlers::workspace;

    Router::new()
        .route("/api/workspace/create", post(workspace::create))
        .route("/api/workspace/add_user", post(workspace::add_user))
        .route("/api/workspace/delete_user", delete(workspace::delete_user))
        .route("/api/workspace/rename", post(workspace::rename))
        .route("/api/workspace/get_by_user", get(workspace::get_by_user))
        .route("/api/workspace/get_users/:workspace_id", get(workspace::get_users))
        .layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

fn channel_routes() -> Router {
    use axum::routing::{delete, post};
    use handlers::channel;

    Router::new()
        .route("/api/channel/create", post(channel::create))
        .route("/api/channel/add_user", post(channel::add_user))
        .route("/api/channel/delete_user/:workspace_id", delete(channel::delete_user))
        .route("/api/channel/delete", delete(channel::delete))
        .route(
            "/api/channel/get_by_user_and_workspace/:workspace_id",
            get(channel::get_by_user_and_workspace),
        )
        .layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

fn dm_routes() -> Router {
    use axum::routing::post;
    use handlers::dm;

    Router::new()
        .route("/api/dm/send", post(dm::send))
        .route("/api/dm/get_by_dm_line/:dm_line_id", get(dm::get_by_dm_line))
        .layer(axum::middleware::from_fn(middleware::jwt_auth_middleware))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Huddle API",
        "version": version,
        "description": "Team messaging backend - workspaces, channels, memberships and direct messages",
        "endpoints": {
            "home": "/ (public)",
            "user": "/api/user/sign_up, /api/user/login (public)",
            "workspace": "/api/workspace/* (protected)",
            "channel": "/api/channel/* (protected)",
            "dm": "/api/dm/* (protected)"
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match database::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "database_error": e.to_string()
            })),
        ),
    }
}
