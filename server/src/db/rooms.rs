//! Database operations for the rooms table.
//!
//! A room's canonical to-do list is a JSONB column, read and replaced as a
//! whole. The sync path locks the row (`FOR UPDATE`) so that exactly one
//! reconciliation is applied per persisted state transition.

use sqlx::{PgConnection, PgPool, Row};
use tandem_engine::Item;
use uuid::Uuid;

/// A stored room row from the database.
#[derive(Debug)]
pub struct StoredRoom {
    pub id: Uuid,
    pub name: String,
    pub password: String,
    pub todos: serde_json::Value,
    pub revision: i64,
    #[allow(dead_code)]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[allow(dead_code)]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredRoom {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(StoredRoom {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            password: row.try_get("password")?,
            todos: row.try_get("todos")?,
            revision: row.try_get("revision")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl StoredRoom {
    /// Deserialize the canonical to-do list.
    pub fn todos(&self) -> Result<Vec<Item>, serde_json::Error> {
        serde_json::from_value(self.todos.clone())
    }
}

const ROOM_COLUMNS: &str = "id, name, password, todos, revision, created_at, updated_at";

/// Create a room with an empty canonical list.
pub async fn create_room(
    pool: &PgPool,
    name: &str,
    password: &str,
) -> Result<StoredRoom, sqlx::Error> {
    sqlx::query_as::<_, StoredRoom>(&format!(
        r#"
        INSERT INTO rooms (name, password)
        VALUES ($1, $2)
        RETURNING {ROOM_COLUMNS}
        "#,
    ))
    .bind(name)
    .bind(password)
    .fetch_one(pool)
    .await
}

/// Look up a room by name.
pub async fn find_room(pool: &PgPool, name: &str) -> Result<Option<StoredRoom>, sqlx::Error> {
    sqlx::query_as::<_, StoredRoom>(&format!(
        r#"
        SELECT {ROOM_COLUMNS}
        FROM rooms
        WHERE name = $1
        "#,
    ))
    .bind(name)
    .fetch_optional(pool)
    .await
}

/// Look up a room by id, locking its row for the rest of the transaction.
pub async fn lock_room(
    conn: &mut PgConnection,
    room_id: Uuid,
) -> Result<Option<StoredRoom>, sqlx::Error> {
    sqlx::query_as::<_, StoredRoom>(&format!(
        r#"
        SELECT {ROOM_COLUMNS}
        FROM rooms
        WHERE id = $1
        FOR UPDATE
        "#,
    ))
    .bind(room_id)
    .fetch_optional(conn)
    .await
}

/// Replace a room's canonical list, bumping its revision.
///
/// Returns the new revision. Call only on a row locked by [`lock_room`].
pub async fn write_todos(
    conn: &mut PgConnection,
    room_id: Uuid,
    todos: &[Item],
) -> Result<i64, sqlx::Error> {
    let payload = serde_json::to_value(todos)
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

    let row = sqlx::query(
        r#"
        UPDATE rooms
        SET todos = $2, revision = revision + 1, updated_at = NOW()
        WHERE id = $1
        RETURNING revision
        "#,
    )
    .bind(room_id)
    .bind(payload)
    .fetch_one(conn)
    .await?;

    row.try_get("revision")
}

/// Check if a SQL error is a unique constraint violation.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        // PostgreSQL unique violation code is "23505"
        db_err.code().map(|c| c == "23505").unwrap_or(false)
    } else {
        false
    }
}
