use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{ADMIN_EMAIL, PASSWORD, setup_test_app};

#[tokio::test]
async fn health_reports_ok_without_a_token() {
    let app = setup_test_app().await;
    let (status, body) = app.send(Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_returns_a_token_for_the_new_account() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;

    let (status, me) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ada@example.com");
    assert_eq!(me["firstName"], "Ada");
    assert_eq!(me["role"], "ROLE_USER");
    assert_eq!(me["tasks"], json!([]));
    assert!(me.get("passwordHash").is_none());
}

#[tokio::test]
async fn register_with_taken_email_conflicts() {
    let app = setup_test_app().await;
    app.register("Ada", "ada@example.com").await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "Other",
                "lastName": "Person",
                "email": "ada@example.com",
                "password": PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
    assert_eq!(body["message"], "Email already in use");
}

#[tokio::test]
async fn register_validates_every_field() {
    let app = setup_test_app().await;
    let (status, body) = app
        .send(
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({
                "firstName": "",
                "lastName": "Tester",
                "email": "nope",
                "password": "weak",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["firstName"], "first name cannot be blank");
    assert_eq!(body["errors"]["email"], "Invalid email format");
    assert!(body["errors"]["password"].is_string());
    assert!(body["errors"].get("lastName").is_none());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = setup_test_app().await;
    let response = app
        .send(
            Method::POST,
            "/api/auth/authenticate",
            None,
            Some(json!("just a string")),
        )
        .await;
    assert_eq!(response.0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn authenticate_accepts_only_matching_credentials() {
    let app = setup_test_app().await;
    let (status, body) = app.login(ADMIN_EMAIL, PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = app.login(ADMIN_EMAIL, "Wrong@1234").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, _) = app.login("ghost@example.com", PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_need_a_valid_token() {
    let app = setup_test_app().await;
    let (status, _) = app
        .send(Method::GET, "/api/tasks/basic", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app.get("/api/users/basic", "forged.token.value").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn token_of_a_deleted_account_stops_working() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let id = app.user_id(&token).await;
    let admin = app.admin_token().await;

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/users/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
