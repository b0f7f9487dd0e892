use axum::http::{Method, StatusCode};
use serde_json::{Value, json};

use crate::common::{TestApp, setup_test_app};

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect()
}

async fn seed_three(app: &TestApp, token: &str) -> [i64; 3] {
    let a = app
        .create_task(
            token,
            json!({"title": "Alpha", "description": "a", "deadline": "2999-03-01"}),
        )
        .await;
    let b = app
        .create_task(
            token,
            json!({"title": "Beta", "description": "b", "deadline": "2999-01-01", "taskStatus": "DONE"}),
        )
        .await;
    let c = app
        .create_task(
            token,
            json!({"title": "Gamma", "description": "c", "deadline": "2999-02-01"}),
        )
        .await;
    [a, b, c]
}

#[tokio::test]
async fn create_defaults_status_and_attaches_users() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let ada = app.user_id(&token).await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/tasks",
            Some(&token),
            Some(json!({
                "title": "Write report",
                "description": "Quarterly numbers",
                "deadline": "2999-01-01",
                "usersIds": [ada],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["taskStatus"], "TO_DO");
    assert_eq!(body["deadline"], "2999-01-01");
    assert_eq!(body["users"][0]["id"], ada);
    assert!(body["users"][0].get("tasks").is_none());
}

#[tokio::test]
async fn create_rejects_duplicates_and_bad_bodies() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    app.create_task(&token, json!({"title": "Once", "description": "d"}))
        .await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/tasks",
            Some(&token),
            Some(json!({"title": "Once", "description": "again"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Task with title 'Once' already exists");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/tasks",
            Some(&token),
            Some(json!({"title": " ", "description": "", "deadline": "2000-01-01"})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"]["title"], "title cannot be blank");
    assert_eq!(body["errors"]["description"], "description cannot be blank");
    assert_eq!(body["errors"]["deadline"], "Deadline must be in the future");
}

#[tokio::test]
async fn detailed_listing_filters_sorts_and_pages() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    seed_three(&app, &token).await;

    let (status, body) = app.get("/api/tasks/detailed", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Alpha", "Beta"]);

    let (_, body) = app.get("/api/tasks/detailed?page=2", &token).await;
    assert_eq!(titles(&body), ["Gamma"]);

    let (_, body) = app
        .get("/api/tasks/detailed?sort=true&sort_direction=ASC", &token)
        .await;
    assert_eq!(titles(&body), ["Beta", "Gamma"]);

    let (_, body) = app
        .get("/api/tasks/detailed?sort=true&sort_direction=DESC", &token)
        .await;
    assert_eq!(titles(&body), ["Alpha", "Gamma"]);

    let (_, body) = app.get("/api/tasks/detailed?status=DONE", &token).await;
    assert_eq!(titles(&body), ["Beta"]);

    let (status, _) = app.get("/api/tasks/detailed?status=LATER", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listings_by_assignee_and_unassigned() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let ada = app.user_id(&token).await;
    let [alpha, _, gamma] = seed_three(&app, &token).await;

    for task in [alpha, gamma] {
        let (status, _) = app
            .send(
                Method::PATCH,
                &format!("/api/tasks/{task}/users"),
                Some(&token),
                Some(json!({"userId": ada, "action": "ADD"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app
        .get(&format!("/api/tasks/basic?user_id={ada}"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Alpha", "Gamma"]);
    assert!(body[0].get("users").is_none());

    let (status, body) = app.get("/api/tasks/unsigned", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), ["Beta"]);
}

#[tokio::test]
async fn lookups_by_id_and_title() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let id = app
        .create_task(&token, json!({"title": "Findable", "description": "d"}))
        .await;

    let (status, by_id) = app.get(&format!("/api/tasks/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    let (_, by_title) = app.get("/api/tasks/titles/Findable", &token).await;
    assert_eq!(by_id, by_title);

    let (status, body) = app.get("/api/tasks/424242", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task with id '424242' not found");

    let (status, body) = app.get("/api/tasks/titles/Missing", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Task with title 'Missing' not found");

    let (status, _) = app.get("/api/tasks/not-a-number", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_replaces_fields_and_assignees() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let ada = app.user_id(&token).await;
    let bob = app.user_id(&app.register("Bob", "bob@example.com").await).await;
    let id = app
        .create_task(
            &token,
            json!({"title": "Draft", "description": "d", "usersIds": [ada]}),
        )
        .await;
    app.create_task(&token, json!({"title": "Taken", "description": "d"}))
        .await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/tasks/{id}"),
            Some(&token),
            Some(json!({
                "title": "Final",
                "description": "done properly",
                "taskStatus": "IN_PROGRESS",
                "deadline": "2999-12-31",
                "usersIds": [bob],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["title"], "Final");
    assert_eq!(body["taskStatus"], "IN_PROGRESS");
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], bob);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/api/tasks/{id}"),
            Some(&token),
            Some(json!({"title": "Taken", "description": "d"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            Method::PUT,
            "/api/tasks/424242",
            Some(&token),
            Some(json!({"title": "Ghost", "description": "d"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn status_patch_takes_a_bare_status() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let id = app
        .create_task(&token, json!({"title": "Flip", "description": "d"}))
        .await;

    let (status, body) = app
        .send(
            Method::PATCH,
            &format!("/api/tasks/{id}/status"),
            Some(&token),
            Some(json!("DONE")),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["taskStatus"], "DONE");

    let (status, _) = app
        .send(
            Method::PATCH,
            "/api/tasks/424242/status",
            Some(&token),
            Some(json!("DONE")),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assignment_actions_report_conflicts() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let ada = app.user_id(&token).await;
    let id = app
        .create_task(&token, json!({"title": "Pair", "description": "d"}))
        .await;
    let uri = format!("/api/tasks/{id}/users");

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({"userId": ada, "action": "ADD"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"][0]["id"], ada);

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({"userId": ada, "action": "ADD"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        format!("User with ID '{ada}' is already attached to the task")
    );

    let (status, body) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({"userId": ada, "action": "REMOVE"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], json!([]));

    let (status, _) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({"userId": ada, "action": "REMOVE"})),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            Method::PATCH,
            &uri,
            Some(&token),
            Some(json!({"userId": 9999, "action": "ADD"})),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_returns_empty_ok_then_not_found() {
    let app = setup_test_app().await;
    let token = app.register("Ada", "ada@example.com").await;
    let id = app
        .create_task(&token, json!({"title": "Temp", "description": "d"}))
        .await;
    let uri = format!("/api/tasks/{id}");

    let (status, body) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
