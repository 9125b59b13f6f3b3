//! Tests for the HTTP request layer: typed bodies in, JSON records and
//! tagged errors out.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use diesel::{Connection, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tempfile::NamedTempFile;
use tower::ServiceExt;

use gridlock::{GameRepository, GameService, router};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn setup_app() -> (NamedTempFile, Router) {
    let db_file = NamedTempFile::new().expect("Failed to create temp file");
    let db_path = db_file.path().to_str().expect("Invalid path").to_string();

    let mut conn = SqliteConnection::establish(&db_path).expect("Failed to connect");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Migrations failed");

    let repo = GameRepository::new(db_path).expect("Failed to create repository");
    (db_file, router(GameService::new(repo)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Bad request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("Bad request"),
    };

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Body read failed")
        .to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Invalid JSON body")
    };
    (status, value)
}

#[tokio::test]
async fn test_create_game_returns_created_record() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, "POST", "/games", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["whose_turn"], "x");
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["outcome"], "ongoing");
    assert_eq!(body["winner"], Value::Null);
    assert_eq!(body["board"]["cells"].as_array().map(|c| c.len()), Some(9));
}

#[tokio::test]
async fn test_get_game_round_trip() {
    let (_db, app) = setup_app();
    let (_, created) = send(&app, "POST", "/games", None).await;
    let id = created["id"].as_i64().expect("id missing");

    let (status, fetched) = send(&app, "GET", &format!("/games/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_get_unknown_game_is_404() {
    let (_db, app) = setup_app();
    let (status, body) = send(&app, "GET", "/games/404", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_make_move_updates_record() {
    let (_db, app) = setup_app();
    let (_, created) = send(&app, "POST", "/games", None).await;
    let id = created["id"].as_i64().expect("id missing");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/games/{id}/moves"),
        Some(json!({ "position": 4, "player": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["whose_turn"], "o");
    assert_eq!(body["board"]["cells"][4], json!({ "occupied": "x" }));
}

#[tokio::test]
async fn test_wrong_turn_is_tagged_422() {
    let (_db, app) = setup_app();
    let (_, created) = send(&app, "POST", "/games", None).await;
    let id = created["id"].as_i64().expect("id missing");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/games/{id}/moves"),
        Some(json!({ "position": 4, "player": "o" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "wrong_turn");
    assert!(body["message"].as_str().expect("message").contains("X"));
}

#[tokio::test]
async fn test_occupied_position_is_tagged_422() {
    let (_db, app) = setup_app();
    let (_, created) = send(&app, "POST", "/games", None).await;
    let id = created["id"].as_i64().expect("id missing");
    let uri = format!("/games/{id}/moves");

    send(&app, "POST", &uri, Some(json!({ "position": 4, "player": "x" }))).await;
    let (status, body) = send(
        &app,
        "POST",
        &uri,
        Some(json!({ "position": 4, "player": "o" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "position_occupied");
}

#[tokio::test]
async fn test_out_of_range_position_is_tagged_422() {
    let (_db, app) = setup_app();
    let (_, created) = send(&app, "POST", "/games", None).await;
    let id = created["id"].as_i64().expect("id missing");

    let (status, body) = send(
        &app,
        "POST",
        &format!("/games/{id}/moves"),
        Some(json!({ "position": 9, "player": "x" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "position_out_of_range");
}

#[tokio::test]
async fn test_move_on_unknown_game_is_404() {
    let (_db, app) = setup_app();
    let (status, body) = send(
        &app,
        "POST",
        "/games/404/moves",
        Some(json!({ "position": 0, "player": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_reset_returns_fresh_record() {
    let (_db, app) = setup_app();
    let (_, created) = send(&app, "POST", "/games", None).await;
    let id = created["id"].as_i64().expect("id missing");
    let uri = format!("/games/{id}/moves");

    for (position, player) in [(0, "x"), (3, "o"), (1, "x"), (4, "o"), (2, "x")] {
        send(&app, "POST", &uri, Some(json!({ "position": position, "player": player }))).await;
    }

    let (status, body) = send(&app, "POST", &format!("/games/{id}/reset"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in_progress");
    assert_eq!(body["outcome"], "ongoing");
    assert_eq!(body["winner"], Value::Null);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["created_at"], created["created_at"]);
}

#[tokio::test]
async fn test_list_games_most_recent_first() {
    let (_db, app) = setup_app();
    let (_, first) = send(&app, "POST", "/games", None).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let (_, second) = send(&app, "POST", "/games", None).await;

    let (status, body) = send(&app, "GET", "/games", None).await;
    assert_eq!(status, StatusCode::OK);
    let games = body.as_array().expect("array body");
    assert_eq!(games.len(), 2);
    assert_eq!(games[0]["id"], second["id"]);
    assert_eq!(games[1]["id"], first["id"]);
}

#[tokio::test]
async fn test_malformed_move_body_rejected() {
    let (_db, app) = setup_app();
    let (_, created) = send(&app, "POST", "/games", None).await;
    let id = created["id"].as_i64().expect("id missing");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/games/{id}/moves"),
        Some(json!({ "position": 1, "player": "x", "extra": true })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}
