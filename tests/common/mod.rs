#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower::ServiceExt;

use deck_backend::api::{create_router, AppState};
use deck_backend::config::Config;
use deck_backend::infrastructure::migrations;

/// In-memory database with the full migration path applied.
/// A single connection, since every sqlite memory connection is its own database.
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    migrations::run_migrations(&pool)
        .await
        .expect("Failed to migrate test database");

    pool
}

pub fn test_config() -> Config {
    Config {
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
    }
}

pub fn test_app(pool: SqlitePool) -> Router {
    let config = test_config();
    let state = AppState::new(Some(pool));
    create_router(state, &config)
}

/// Serves the router on an ephemeral port and returns the API base url.
pub async fn spawn_server(pool: SqlitePool) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");
    let app = test_app(pool);

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server failed");
    });

    format!("http://{}/api", addr)
}

pub async fn seed_card(
    pool: &SqlitePool,
    stack_id: i64,
    title: &str,
    archived: bool,
    last_modified: i64,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO deck_cards (title, stack_id, archived, last_modified) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(title)
    .bind(stack_id)
    .bind(archived)
    .bind(last_modified)
    .fetch_one(pool)
    .await
    .expect("Failed to seed card")
}

pub async fn make_request(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, String) {
    let mut request = Request::builder().uri(uri).method(method);

    if body.is_some() {
        request = request.header("content-type", "application/json");
    }

    let request = request
        .body(Body::from(body.unwrap_or_default()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body_str = String::from_utf8(body.to_vec()).unwrap();

    (status, body_str)
}
