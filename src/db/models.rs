use garde::Validate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// A row of the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Inbound user body. Missing fields take zero values; an `id` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct UserPayload {
    #[garde(length(chars, min = 2, max = 100))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(range(min = 0, max = 130))]
    pub age: i32,
}

impl UserPayload {
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}

/// Equality filters for listing; `None` imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub age: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: i64,
    limit: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Page {
    /// Non-positive values fall back to the defaults.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: if page >= 1 { page } else { DEFAULT_PAGE },
            limit: if limit >= 1 { limit } else { DEFAULT_LIMIT },
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_falls_back_on_non_positive_values() {
        assert_eq!(Page::new(0, -3), Page::default());
        assert_eq!(Page::new(3, 0), Page::new(3, DEFAULT_LIMIT));
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Page::new(1, 5).offset(), 0);
        assert_eq!(Page::new(2, 5).offset(), 5);
        assert_eq!(Page::new(i64::MAX, i64::MAX).offset(), i64::MAX);
    }

    #[test]
    fn payload_ignores_body_id_and_defaults_missing_fields() {
        let payload: UserPayload =
            serde_json::from_str(r#"{"id": 42, "name": "Jane"}"#).expect("payload");
        assert_eq!(payload.email, "");
        assert_eq!(payload.age, 0);

        let user = payload.into_user(7);
        assert_eq!(user.id, 7);
        assert_eq!(user.name, "Jane");
    }
}
