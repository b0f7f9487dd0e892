use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::{PASSWORD, setup_test_app};

#[tokio::test]
async fn detailed_listing_is_paged_by_one_based_page_numbers() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    app.register("Bob", "bob@example.com").await;

    // Seeded admin plus two registered users, page size 2.
    let (status, first) = app.get("/api/users/detailed?page=1", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first.as_array().unwrap().len(), 2);

    let (_, page_zero) = app.get("/api/users/detailed?page=0", &token).await;
    assert_eq!(page_zero, first);

    let (_, second) = app.get("/api/users/detailed?page=2", &token).await;
    let second = second.as_array().unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0]["email"], "bob@example.com");
    assert_eq!(second[0]["tasks"], json!([]));
}

#[tokio::test]
async fn basic_listing_filters_by_names() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    app.register("Bob", "bob@example.com").await;

    let (status, users) = app
        .get("/api/users/basic?firstName=Bob&lastName=Tester", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "bob@example.com");
    assert!(users[0].get("tasks").is_none());
}

#[tokio::test]
async fn lookups_by_id_and_email() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let id = app.user_id(&token).await;

    let (status, by_id) = app.get(&format!("/api/users/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    let (_, by_email) = app.get("/api/users/emails/ada@example.com", &token).await;
    assert_eq!(by_id, by_email);

    let (status, body) = app.get("/api/users/9999", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with id '9999' not found");

    let (status, _) = app.get("/api/users/emails/ghost@example.com", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn current_user_is_the_token_owner() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let (status, me) = app.get("/api/users/current-user", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "ada@example.com");
}

#[tokio::test]
async fn profile_update_replaces_task_assignments() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let keep = app
        .create_task(&token, json!({"title": "Keep", "description": "d"}))
        .await;
    let other = app
        .create_task(&token, json!({"title": "Other", "description": "d"}))
        .await;

    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/users",
            Some(&token),
            Some(json!({
                "firstName": "Ada",
                "lastName": "Byron",
                "email": "ada.byron@example.com",
                "taskIds": [keep, other],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["lastName"], "Byron");
    assert_eq!(body["tasks"].as_array().unwrap().len(), 2);

    let (_, body) = app
        .send(
            Method::PATCH,
            "/api/users",
            Some(&token),
            Some(json!({
                "firstName": "Ada",
                "lastName": "Byron",
                "email": "ada.byron@example.com",
                "taskIds": [other],
            })),
        )
        .await;
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["id"], other);
}

#[tokio::test]
async fn profile_update_onto_a_taken_email_conflicts() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    app.register("Bob", "bob@example.com").await;
    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/users",
            Some(&token),
            Some(json!({
                "firstName": "Ada",
                "lastName": "Tester",
                "email": "bob@example.com",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn user_changes_own_password() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;

    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/users/change-password",
            Some(&token),
            Some(json!({"oldPassword": "Wrong@1234", "newPassword": "Fresh#4567"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid current password");

    let (status, body) = app
        .send(
            Method::PATCH,
            "/api/users/change-password",
            Some(&token),
            Some(json!({"oldPassword": PASSWORD, "newPassword": "Fresh#4567"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Password changed successfully");

    let (status, _) = app.login("ada@example.com", "Fresh#4567").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app.login("ada@example.com", PASSWORD).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_only_operations_are_forbidden_to_users() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let id = app.user_id(&token).await;

    let (status, _) = app
        .send(
            Method::PATCH,
            "/api/users/change-password/admin",
            Some(&token),
            Some(json!({"email": "ada@example.com", "newPassword": "Fresh#4567"})),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/users/{id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["status"], 403);
}

#[tokio::test]
async fn admin_resets_passwords_and_removes_users() {
    let app = setup_test_app().await;
    let admin = app.admin_token().await;
    let token = app.register("Ada", "ada@example.com").await;
    let id = app.user_id(&token).await;

    let (status, _) = app
        .send(
            Method::PATCH,
            "/api/users/change-password/admin",
            Some(&admin),
            Some(json!({"email": "ada@example.com", "newPassword": "Reset!7890"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(app.login("ada@example.com", "Reset!7890").await.0, StatusCode::OK);

    let (status, _) = app
        .send(
            Method::PATCH,
            "/api/users/change-password/admin",
            Some(&admin),
            Some(json!({"email": "ghost@example.com", "newPassword": "Reset!7890"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/users/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "User removed successfully");

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/users/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
