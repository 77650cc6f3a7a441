use crate::db::models::{Page, User, UserFilter, UserPayload};
use crate::db::schema::SQLITE_INIT;
use crate::error::ServiceError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, QueryBuilder, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

const SELECT_USERS: &str = "SELECT id, name, email, age FROM users";

/// Open the shared pool, creating the database file if it is missing.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, ServiceError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(connect_opts)
        .await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct UserStorage {
    pool: SqlitePool,
}

impl UserStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn ensure_schema(&self) -> Result<(), ServiceError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Rows matching every supplied filter field, ordered by id.
    pub async fn list(&self, filter: &UserFilter, page: Page) -> Result<Vec<User>, ServiceError> {
        let mut qb = QueryBuilder::<Sqlite>::new(SELECT_USERS);
        qb.push(" WHERE 1 = 1");
        if let Some(name) = &filter.name {
            qb.push(" AND name = ").push_bind(name.clone());
        }
        if let Some(age) = filter.age {
            qb.push(" AND age = ").push_bind(age);
        }
        qb.push(" ORDER BY id LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let users = qb.build_query_as::<User>().fetch_all(&self.pool).await?;
        Ok(users)
    }

    pub async fn get(&self, id: i64) -> Result<User, ServiceError> {
        sqlx::query_as::<_, User>("SELECT id, name, email, age FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }

    /// Insert a new row. Returns the stored user with its generated id.
    pub async fn insert(&self, payload: UserPayload) -> Result<User, ServiceError> {
        let result = sqlx::query("INSERT INTO users (name, email, age) VALUES (?, ?, ?)")
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(payload.age)
            .execute(&self.pool)
            .await?;
        let id = result.last_insert_rowid();
        debug!(id, "user inserted");
        Ok(payload.into_user(id))
    }

    /// Overwrite every field except id.
    pub async fn update(&self, id: i64, payload: UserPayload) -> Result<User, ServiceError> {
        let result = sqlx::query("UPDATE users SET name = ?, email = ?, age = ? WHERE id = ?")
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(payload.age)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::UserNotFound);
        }
        Ok(payload.into_user(id))
    }

    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(ServiceError::UserNotFound);
        }
        Ok(())
    }
}
