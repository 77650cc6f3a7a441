//! Database module: the user record store.
//!
//! Layout:
//! - `models.rs`: `User` row, inbound payload, list filter and paging
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: pool setup and queries

pub mod models;
pub mod schema;
pub mod sqlite;

pub use models::{Page, User, UserFilter, UserPayload};
pub use sqlite::{SqlitePool, UserStorage, connect};
