use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State, rejection::PathRejection},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db::{Page, User, UserFilter, UserPayload};
use crate::service::validator;
use crate::{error::ServiceError, router::AppState};

/// Raw `GET /users` query. Every value is kept as text and parsed leniently.
#[derive(Debug, Default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
}

impl ListQuery {
    /// The first occurrence of each key wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.page,
                "limit" => &mut query.limit,
                "name" => &mut query.name,
                "age" => &mut query.age,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        query
    }

    pub fn page(&self) -> Page {
        let page = parse_or(self.page.as_deref(), 0);
        let limit = parse_or(self.limit.as_deref(), 0);
        Page::new(page, limit)
    }

    pub fn filter(&self) -> UserFilter {
        UserFilter {
            name: self.name.clone().filter(|n| !n.is_empty()),
            age: self.age.as_deref().and_then(|a| a.trim().parse().ok()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_or(raw: Option<&str>, fallback: i64) -> i64 {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(fallback)
}

/// Unparsable ids become 0, which never matches a generated id.
fn parse_id(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

fn path_id(path: Result<Path<String>, PathRejection>) -> i64 {
    match path {
        Ok(Path(raw)) => parse_id(&raw),
        Err(e) => {
            debug!(error = %e, "unreadable user id; using 0");
            0
        }
    }
}

/// Malformed bodies decode to a zero-valued payload and fail validation later.
fn decode_payload(body: &[u8]) -> UserPayload {
    serde_json::from_slice(body)
        .inspect_err(|e| debug!(error = %e, "malformed user body; using zero values"))
        .unwrap_or_default()
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<User>>, ServiceError> {
    let query = ListQuery::from_pairs(pairs);
    let users = state.storage.list(&query.filter(), query.page()).await?;
    Ok(Json(users))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<User>, ServiceError> {
    let user = state.storage.get(path_id(id)).await?;
    Ok(Json(user))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<User>, ServiceError> {
    let payload = decode_payload(&body);
    validator::validate(&payload).map_err(ServiceError::Validation)?;

    let user = state.storage.insert(payload).await?;
    info!(id = user.id, "user created");
    Ok(Json(user))
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<User>, ServiceError> {
    let payload = decode_payload(&body);
    validator::validate(&payload).map_err(ServiceError::Validation)?;

    let user = state.storage.update(path_id(id), payload).await?;
    info!(id = user.id, "user updated");
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, ServiceError> {
    let id = path_id(id);
    state.storage.delete(id).await?;
    info!(id, "user deleted");
    Ok(Json(MessageResponse {
        message: "User deleted".to_string(),
    }))
}
