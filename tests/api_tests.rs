mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

async fn create_stack(app: &axum::Router, board_id: i64, title: &str, order: i64) -> Value {
    let body = json!({ "title": title, "boardId": board_id, "order": order }).to_string();
    let (status, body) = common::make_request(app.clone(), "POST", "/api/stacks", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    serde_json::from_str(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let pool = common::setup_test_db().await;
    let app = common::test_app(pool);

    let (status, body) = common::make_request(app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("\"status\":\"ok\""));
}

#[tokio::test]
async fn test_create_and_list_stacks() {
    let pool = common::setup_test_db().await;
    let app = common::test_app(pool.clone());

    let todo = create_stack(&app, 1, "Todo", 0).await;
    let done = create_stack(&app, 1, "Done", 1).await;
    create_stack(&app, 2, "Elsewhere", 0).await;

    assert_eq!(todo["stalenessGradientEnabled"], false);
    assert_eq!(todo["deletedAt"], 0);

    let todo_id = todo["id"].as_i64().unwrap();
    common::seed_card(&pool, todo_id, "live", false, 10).await;
    common::seed_card(&pool, todo_id, "old", true, 5).await;

    let (status, body) = common::make_request(app, "GET", "/api/stacks/1", None).await;
    assert_eq!(status, StatusCode::OK);

    let stacks: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(stacks.len(), 2);
    assert_eq!(stacks[0]["title"], "Todo");
    assert_eq!(stacks[1]["id"], done["id"]);
    assert_eq!(stacks[0]["cards"].as_array().unwrap().len(), 1);
    assert_eq!(stacks[0]["cards"][0]["title"], "live");
    assert!(stacks[1]["cards"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_archived_stacks_only_with_archived_cards() {
    let pool = common::setup_test_db().await;
    let app = common::test_app(pool.clone());

    let todo = create_stack(&app, 1, "Todo", 0).await;
    create_stack(&app, 1, "Done", 1).await;
    common::seed_card(&pool, todo["id"].as_i64().unwrap(), "archived", true, 5).await;

    let (status, body) = common::make_request(app, "GET", "/api/stacks/1/archived", None).await;
    assert_eq!(status, StatusCode::OK);

    let stacks: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert_eq!(stacks.len(), 1);
    assert_eq!(stacks[0]["id"], todo["id"]);
    assert_eq!(stacks[0]["cards"][0]["archived"], true);
}

#[tokio::test]
async fn test_create_rejects_blank_title() {
    let pool = common::setup_test_db().await;
    let app = common::test_app(pool);

    let body = json!({ "title": "  ", "boardId": 1 }).to_string();
    let (status, body) = common::make_request(app, "POST", "/api/stacks", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["status"], 400);
}

#[tokio::test]
async fn test_update_toggles_staleness_gradient() {
    let pool = common::setup_test_db().await;
    let app = common::test_app(pool);

    let stack = create_stack(&app, 1, "Todo", 0).await;
    let id = stack["id"].as_i64().unwrap();

    let body = json!({ "id": id, "stalenessGradientEnabled": true }).to_string();
    let (status, body) =
        common::make_request(app.clone(), "PUT", &format!("/api/stacks/{}", id), Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let updated: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(updated["stalenessGradientEnabled"], true);
    assert_eq!(updated["title"], "Todo");

    let (status, _) = common::make_request(
        app,
        "PUT",
        "/api/stacks/999",
        Some(json!({ "id": 999, "title": "x" }).to_string()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_soft() {
    let pool = common::setup_test_db().await;
    let app = common::test_app(pool.clone());

    let stack = create_stack(&app, 1, "Todo", 0).await;
    let id = stack["id"].as_i64().unwrap();

    let (status, body) =
        common::make_request(app.clone(), "DELETE", &format!("/api/stacks/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    let deleted: Value = serde_json::from_str(&body).unwrap();
    assert!(deleted["deletedAt"].as_i64().unwrap() > 0);

    let remaining: i64 = sqlx::query_scalar("SELECT count(*) FROM deck_stacks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 1);

    let (_, body) = common::make_request(app.clone(), "GET", "/api/stacks/1", None).await;
    let stacks: Vec<Value> = serde_json::from_str(&body).unwrap();
    assert!(stacks.is_empty());

    let (status, _) =
        common::make_request(app, "DELETE", &format!("/api/stacks/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reorder_renumbers_board() {
    let pool = common::setup_test_db().await;
    let app = common::test_app(pool);

    let a = create_stack(&app, 1, "A", 0).await;
    let b = create_stack(&app, 1, "B", 5).await;
    let c = create_stack(&app, 1, "C", 9).await;

    let body = json!({ "order": 2 }).to_string();
    let (status, body) = common::make_request(
        app,
        "PUT",
        &format!("/api/stacks/{}/reorder", a["id"]),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let stacks: Vec<Value> = serde_json::from_str(&body).unwrap();
    let order: Vec<(Value, i64)> = stacks
        .iter()
        .map(|s| (s["id"].clone(), s["order"].as_i64().unwrap()))
        .collect();
    assert_eq!(
        order,
        vec![(b["id"].clone(), 0), (c["id"].clone(), 1), (a["id"].clone(), 2)]
    );
}
