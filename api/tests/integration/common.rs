use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use enigma::application::use_cases::auth::seed_admin::SeedAdmin;
use enigma::bootstrap::app_context::{AppContext, AppServices};
use enigma::bootstrap::config::Config;
use enigma::infrastructure::memory::MemoryStore;
use enigma::presentation::http::router::build_router;

pub const PASSWORD: &str = "Secret@123";
pub const ADMIN_EMAIL: &str = "admin@example.com";

pub struct TestApp {
    pub router: Router,
}

/// Router over a fresh memory store with one seeded admin.
pub async fn setup_test_app() -> TestApp {
    let store = MemoryStore::new();
    SeedAdmin { repo: &store }
        .execute(ADMIN_EMAIL, PASSWORD)
        .await
        .expect("seed admin");
    let ctx = AppContext::new(
        Config::for_memory("integration-test-secret"),
        AppServices::in_memory(store),
    );
    TestApp {
        router: build_router(ctx),
    }
}

impl TestApp {
    /// Sends a request and decodes the body as JSON, or as a JSON string
    /// when the response is plain text.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            req = req.header("authorization", format!("Bearer {token}"));
        }
        let req = match body {
            Some(b) => req
                .header("content-type", "application/json")
                .body(Body::from(b.to_string())),
            None => req.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    /// Registers `first_name` with `email` and returns the issued token.
    pub async fn register(&self, first_name: &str, email: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/register",
                None,
                Some(json!({
                    "firstName": first_name,
                    "lastName": "Tester",
                    "email": email,
                    "password": PASSWORD,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.send(
            Method::POST,
            "/api/auth/authenticate",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self.login(ADMIN_EMAIL, PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn user_id(&self, token: &str) -> i64 {
        let (_, body) = self.get("/api/auth/me", token).await;
        body["id"].as_i64().unwrap()
    }

    /// Creates a task and returns its id.
    pub async fn create_task(&self, token: &str, body: Value) -> i64 {
        let (status, created) = self
            .send(Method::POST, "/api/tasks", Some(token), Some(body))
            .await;
        assert_eq!(status, StatusCode::OK, "create task failed: {created}");
        created["id"].as_i64().unwrap()
    }
}
