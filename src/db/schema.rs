//! SQL DDL for the user store.

/// `users` table:
/// - `id` INTEGER PRIMARY KEY AUTOINCREMENT, assigned on insert
/// - `name`, `email`, `age` mirrored from `User`
///
/// No UNIQUE constraint on `email`.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    age INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_users_name ON users(name);
"#;
