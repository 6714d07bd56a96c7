//! Router harness for unit tests: an in-memory store behind the real router.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::FromRef,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    app::build_app,
    auth::{jwt::JwtKeys, password::hash_password},
    state::AppState,
    users::{
        memory::MemoryUserStore,
        repo::UserStore,
        repo_types::{NewUser, User},
    },
};

pub struct TestApp {
    pub app: Router,
    pub state: AppState,
    pub store: Arc<MemoryUserStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryUserStore::default());
        let state = AppState::fake_with_store(store.clone());
        Self {
            app: build_app(state.clone()),
            state,
            store,
        }
    }

    pub fn keys(&self) -> JwtKeys {
        JwtKeys::from_ref(&self.state)
    }

    pub async fn add_user(&self, name: &str, age: i32, group_id: Option<i64>, password: &str) -> User {
        let new_user = NewUser {
            name: name.to_string(),
            age,
            group_id,
            hashed_password: hash_password(password).expect("hash"),
        };
        self.store
            .insert_if_name_absent(&new_user)
            .await
            .expect("insert")
            .expect("name already taken in test store")
    }
}

pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

pub fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).expect("request")
}

/// Sends one request through the router. Non-JSON bodies come back as
/// `Value::String`, empty ones as `Value::Null`.
pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let res = app.clone().oneshot(req).await.expect("router is infallible");
    let status = res.status();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
