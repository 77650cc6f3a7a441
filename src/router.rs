use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::config::Config;
use crate::db::UserStorage;
use crate::handlers::{auth, users};
use crate::middleware::{deadline::enforce_deadline, request_log::log_requests};
use crate::service::credentials::{CredentialVerifier, StaticCredentials};

/// Dependencies shared by every handler, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub storage: UserStorage,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        storage: UserStorage,
        credentials: Arc<dyn CredentialVerifier>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            storage,
            credentials,
            request_timeout,
        }
    }

    pub fn from_config(storage: UserStorage, cfg: &Config) -> Self {
        Self::new(
            storage,
            Arc::new(StaticCredentials::from_config(cfg)),
            cfg.request_timeout(),
        )
    }
}

pub fn app_router(state: AppState) -> Router {
    let deadline = state.request_timeout;
    Router::new()
        .route("/login", post(auth::login))
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(from_fn_with_state(deadline, enforce_deadline))
        .layer(from_fn(log_requests))
        .with_state(state)
}
