#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde::de::DeserializeOwned;
use std::{
    fs,
    path::PathBuf,
    sync::Arc,
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;
use user_service::db::{self, UserStorage};
use user_service::service::credentials::{CredentialVerifier, StaticCredentials};
use user_service::{AppState, app_router};

/// A router over its own SQLite file, removed on drop.
pub struct TestApp {
    pub app: Router,
    pub storage: UserStorage,
    path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(StaticCredentials::new(
            "user",
            "password",
            "your_token_here",
        )))
        .await
    }

    pub async fn spawn_with(credentials: Arc<dyn CredentialVerifier>) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "user-service-test-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));

        let database_url = format!("sqlite:{}", path.display());
        let pool = db::connect(&database_url, 4)
            .await
            .expect("failed to open test database");
        let storage = UserStorage::new(pool);
        storage.ensure_schema().await.expect("failed to create schema");

        let state = AppState::new(storage.clone(), credentials, Duration::from_secs(10));
        Self {
            app: app_router(state),
            storage,
            path,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let req = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .expect("failed to build request");

        let resp = self.app.clone().oneshot(req).await.expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        (status, bytes.to_vec())
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: &str,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, T) {
        let (status, bytes) = self.send(method, uri, body).await;
        let value = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            panic!(
                "response was not the expected JSON ({e}): {}",
                String::from_utf8_lossy(&bytes)
            )
        });
        (status, value)
    }
}

pub fn body_text(bytes: &[u8]) -> &str {
    std::str::from_utf8(bytes).expect("response body was not utf-8")
}
