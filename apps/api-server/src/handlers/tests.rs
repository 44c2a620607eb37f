use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};
use tempfile::TempDir;

use quill_infra::database::DatabaseConfig;

use super::configure_routes;
use crate::middleware::error::PAYLOAD_FIELD;
use crate::state::AppState;

async fn test_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("quill.db").display());
    let state = AppState::connect(&DatabaseConfig::new(url)).await.unwrap();
    (dir, state)
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr) => {{
        let resp = test::call_service(&$app, $req.to_request()).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn create_user(name: &str, age: i64) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/user")
        .set_json(json!({ "name": name, "age": age }))
}

fn create_post(title: &str, body: &str, author_id: i64) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({ "title": title, "body": body, "author_id": author_id }))
}

fn list_posts() -> test::TestRequest {
    test::TestRequest::get().uri("/posts/")
}

#[actix_rt::test]
async fn test_create_user_returns_generated_id() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (status, body) = send!(app, create_user("Ada", 36));

    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["age"], 36);
}

#[actix_rt::test]
async fn test_identical_users_are_not_deduplicated() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (_, first) = send!(app, create_user("Ada", 36));
    let (_, second) = send!(app, create_user("Ada", 36));

    assert_ne!(first["id"], second["id"]);
}

#[actix_rt::test]
async fn test_create_user_accepts_boundaries() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (low, _) = send!(app, create_user("Al", 5));
    let (high, _) = send!(app, create_user(&"z".repeat(25), 111));

    assert_eq!(low, StatusCode::OK);
    assert_eq!(high, StatusCode::OK);
}

#[actix_rt::test]
async fn test_create_user_rejects_constraint_violations() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let long_name = "n".repeat(26);
    let cases = [
        ("Alice", 4, "age"),
        ("Alice", 112, "age"),
        ("a", 30, "name"),
        (long_name.as_str(), 30, "name"),
    ];

    for (name, age, field) in cases {
        let (status, body) = send!(app, create_user(name, age));
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"][0]["field"], field);
    }

    let session = state.sessions.open().await.unwrap();
    assert!(session.find_user(1).await.unwrap().is_none());
}

#[actix_rt::test]
async fn test_malformed_body_is_unprocessable() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let missing_field = test::TestRequest::post()
        .uri("/posts")
        .set_json(json!({ "title": "t", "body": "b" }));
    let (status, body) = send!(app, missing_field);
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], PAYLOAD_FIELD);
    assert_eq!(body["errors"][0]["code"], "malformed");

    let wrong_type = test::TestRequest::post()
        .uri("/user")
        .set_json(json!({ "name": "Alice", "age": "old" }));
    let (status, _) = send!(app, wrong_type);
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_rt::test]
async fn test_create_post_embeds_author() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (_, author) = send!(app, create_user("Grace", 85));
    let author_id = author["id"].as_i64().unwrap();

    let (status, post) = send!(app, create_post("COBOL", "A history", author_id));

    assert_eq!(status, StatusCode::OK);
    assert!(post["id"].as_i64().unwrap() > 0);
    assert_eq!(post["title"], "COBOL");
    assert_eq!(post["body"], "A history");
    assert_eq!(post["author_id"], author_id);
    assert_eq!(post["author"], author);
}

#[actix_rt::test]
async fn test_create_post_with_unknown_author() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (status, body) = send!(app, create_post("Orphan", "No one wrote this", 999));

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Author not found.");

    let (status, posts) = send!(app, list_posts());
    assert_eq!(status, StatusCode::OK);
    assert_eq!(posts, json!([]));
}

#[actix_rt::test]
async fn test_create_post_with_author_id_beyond_i32() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (status, body) = send!(app, create_post("Far", "away", 2_147_483_648));

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Author not found.");
}

#[actix_rt::test]
async fn test_concurrent_posts_all_succeed() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (_, author) = send!(app, create_user("Ada", 36));
    let author_id = author["id"].as_i64().unwrap();

    let requests = (0..8).map(|i| {
        test::call_service(
            &app,
            create_post(&format!("P{i}"), "body", author_id).to_request(),
        )
    });
    for resp in futures::future::join_all(requests).await {
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let (_, posts) = send!(app, list_posts());
    assert_eq!(posts.as_array().unwrap().len(), 8);
}

#[actix_rt::test]
async fn test_list_posts_empty() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (status, body) = send!(app, list_posts());

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_rt::test]
async fn test_list_posts_returns_all_with_authors() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (_, alice) = send!(app, create_user("Alice", 30));
    let (_, bob) = send!(app, create_user("Bob", 41));
    let (_, p1) = send!(app, create_post("P1", "one", alice["id"].as_i64().unwrap()));
    let (_, p2) = send!(app, create_post("P2", "two", bob["id"].as_i64().unwrap()));

    let (status, body) = send!(app, list_posts());

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([p1, p2]));
    assert_eq!(body[0]["author"], alice);
    assert_eq!(body[1]["author"], bob);
}

#[actix_rt::test]
async fn test_health_check() {
    let (_dir, state) = test_state().await;
    let app = init_app!(state);

    let (status, body) = send!(app, test::TestRequest::get().uri("/health"));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
