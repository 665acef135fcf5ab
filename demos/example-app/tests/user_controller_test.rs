use decor::prelude::*;
use decor_test::TestApp;
use example_app::models::User;
use serde_json::{json, Value};

fn test_app() -> TestApp {
    let config = DecorConfig::from_yaml_str("app:\n  greeting: \"Bonjour\"\n", "test").unwrap();
    TestApp::from_builder(example_app::app(config))
}

#[tokio::test]
async fn list_users() {
    let resp = test_app().get("/users").send().await.assert_ok();
    let users: Vec<User> = resp.json();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "John Doe");
    assert_eq!(users[1].name, "Jane Smith");
}

#[tokio::test]
async fn get_user_by_id() {
    let resp = test_app().get("/users/2").send().await.assert_ok();
    let user: User = resp.json();
    assert_eq!(user, User { id: 2, name: "Jane Smith".into() });
}

#[tokio::test]
async fn unknown_user_is_404_with_error_body() {
    let resp = test_app().get("/users/99").send().await.assert_not_found();
    let body: Value = resp.json();
    assert_eq!(body, json!({ "error": "User not found" }));
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    test_app()
        .get("/users/abc")
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_user_then_list() {
    let app = test_app();
    let resp = app
        .post("/users")
        .json(&json!({ "name": "Ada Lovelace" }))
        .send()
        .await
        .assert_created();
    let created: User = resp.json();
    assert_eq!(created, User { id: 3, name: "Ada Lovelace".into() });

    let users: Vec<User> = app.get("/users").send().await.assert_ok().json();
    assert_eq!(users.len(), 3);
}

#[tokio::test]
async fn create_requires_json_content_type() {
    test_app()
        .post("/users")
        .body(r#"{"name":"x"}"#)
        .send()
        .await
        .assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn malformed_json_is_400() {
    test_app()
        .post("/users")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn controller_middleware_tags_every_user_route() {
    let app = test_app();
    app.get("/users").send().await.assert_header("x-served-by", "users");
    app.get("/users/99").send().await.assert_header("x-served-by", "users");
    // Method middleware short-circuits inside the controller middleware.
    app.post("/users")
        .send()
        .await
        .assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE)
        .assert_header("x-served-by", "users");
}

#[tokio::test]
async fn greeting_comes_from_the_container() {
    let app = test_app();
    app.get("/greeting")
        .send()
        .await
        .assert_ok()
        .assert_text("Bonjour, World!");
    app.get("/greeting/Ferris")
        .send()
        .await
        .assert_ok()
        .assert_text("Bonjour, Ferris!");
    let resp = app.get("/greeting").send().await;
    assert!(resp.header("x-served-by").is_none());
}

#[tokio::test]
async fn plain_routes_sit_next_to_controllers() {
    test_app().get("/health").send().await.assert_ok().assert_text("OK");
}
