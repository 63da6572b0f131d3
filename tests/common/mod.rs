#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use trip_requests::{
    app,
    config::Config,
    models::{NewUser, User},
    repository::{InMemoryStore, UserRepository},
    state::AppState,
};

pub const PASSWORD: &str = "Bien@BAR789";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub config: Config,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config {
            jwt_secret: "test-secret".into(),
            bcrypt_cost: 4,
            ..Config::default()
        };
        let store = Arc::new(InMemoryStore::default());
        let state = AppState::new(config.clone(), store.clone(), store.clone());

        Self {
            router: app(state),
            store,
            config,
        }
    }

    pub async fn seed_user(&self, email: &str, verified: bool, manager_id: Option<Uuid>) -> User {
        self.store
            .create(NewUser {
                first_name: "Test".into(),
                last_name: "User".into(),
                email: email.into(),
                password_hash: bcrypt::hash(PASSWORD, 4).unwrap(),
                is_verified: verified,
                role: "requester".into(),
                manager_id,
            })
            .await
            .unwrap()
    }

    /// A verified user with a manager, plus that user's session token.
    pub async fn requester(&self, email: &str) -> (User, String) {
        let manager = self
            .seed_user(&format!("manager.{email}"), true, None)
            .await;
        let user = self.seed_user(email, true, Some(manager.id)).await;
        let token = self.login(email, PASSWORD).await;
        (user, token)
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/v1/auth/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["data"].as_str().unwrap().to_owned()
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("token", token);
        }
        let request = match body {
            Some(body) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.dispatch(request).await
    }

    pub async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}

pub fn trip_payload(departure: &str, return_date: &str) -> Value {
    serde_json::json!({
        "destination": "Nairobi",
        "location": "Kigali",
        "departureDate": departure,
        "returnDate": return_date,
        "reason": "vacation",
        "gender": "Male",
        "passportName": "Jimmy Ntare",
        "role": "requester"
    })
}
