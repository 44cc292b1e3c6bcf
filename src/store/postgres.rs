//! PostgreSQL store
//!
//! Backs the store traits with the `accountuser`, `category` and
//! `financeentry` tables. Connections come from the pool per operation and
//! return to it when dropped.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgConnection, PgPool};

use crate::domain::{AddedEntry, EntryUpdate, EntryView, NewEntry, NewUser, User};

use super::{CategoryRegistry, EntryStore, StoreError, UserDirectory};

/// Store backed by a Postgres pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// =========================================================================
// Category resolution
// =========================================================================

/// Lookup-or-create on an already acquired connection.
///
/// The unique index on `category.name` makes concurrent first uses converge:
/// the loser of the insert race re-reads the winner's row.
async fn resolve_category_on(conn: &mut PgConnection, name: &str) -> Result<i32, StoreError> {
    let existing: Option<i32> =
        sqlx::query_scalar("SELECT category_id FROM category WHERE name = $1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

    if let Some(category_id) = existing {
        return Ok(category_id);
    }

    let inserted: Option<i32> = sqlx::query_scalar(
        r#"
        INSERT INTO category (name)
        VALUES ($1)
        ON CONFLICT (name) DO NOTHING
        RETURNING category_id
        "#,
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;

    match inserted {
        Some(category_id) => {
            tracing::debug!("Created category '{}' ({})", name, category_id);
            Ok(category_id)
        }
        None => {
            let category_id: i32 =
                sqlx::query_scalar("SELECT category_id FROM category WHERE name = $1")
                    .bind(name)
                    .fetch_one(&mut *conn)
                    .await?;
            Ok(category_id)
        }
    }
}

// =========================================================================
// UserDirectory
// =========================================================================

#[async_trait]
impl UserDirectory for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<i32, StoreError> {
        let user_id: Option<i32> = sqlx::query_scalar(
            r#"
            INSERT INTO accountuser (first_name, last_name, email, password)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING user_id
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_optional(&self.pool)
        .await?;

        user_id.ok_or(StoreError::DuplicateEmail)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row: Option<(i32, String, String, String, String)> = sqlx::query_as(
            r#"
            SELECT user_id, first_name, last_name, email, password
            FROM accountuser
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(id, first_name, last_name, email, password_hash)| User {
            id,
            first_name,
            last_name,
            email,
            password_hash,
        }))
    }
}

// =========================================================================
// CategoryRegistry
// =========================================================================

#[async_trait]
impl CategoryRegistry for PgStore {
    async fn resolve_category(&self, name: &str) -> Result<i32, StoreError> {
        let mut conn = self.pool.acquire().await?;
        resolve_category_on(&mut conn, name).await
    }

    async fn category_exists(&self, category_id: i32) -> Result<bool, StoreError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM category WHERE category_id = $1)")
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn list_category_names(&self) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT name FROM category ORDER BY category_id")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }
}

// =========================================================================
// EntryStore
// =========================================================================

#[async_trait]
impl EntryStore for PgStore {
    async fn add_entry(&self, owner_id: i32, entry: NewEntry) -> Result<AddedEntry, StoreError> {
        // Category and entry commit together or not at all
        let mut tx = self.pool.begin().await?;

        let category_id = resolve_category_on(&mut tx, &entry.category_name).await?;

        let entry_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO financeentry (user_id, category, title, amount, date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING entry_id
            "#,
        )
        .bind(owner_id)
        .bind(category_id)
        .bind(&entry.title)
        .bind(entry.amount)
        .bind(entry.date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(AddedEntry {
            entry_id,
            category_id,
        })
    }

    async fn list_entries(&self, owner_id: i32) -> Result<Vec<EntryView>, StoreError> {
        let rows: Vec<(i32, String, i32, NaiveDate, String)> = sqlx::query_as(
            r#"
            SELECT fe.entry_id, fe.title, fe.amount, fe.date, c.name
            FROM financeentry fe
            JOIN category c ON fe.category = c.category_id
            WHERE fe.user_id = $1
            ORDER BY fe.entry_id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(entry_id, title, amount, date, category_name)| EntryView {
                entry_id,
                title,
                amount,
                date,
                category_name,
            })
            .collect())
    }

    async fn update_entry(
        &self,
        owner_id: i32,
        entry_id: i32,
        update: EntryUpdate,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE financeentry
            SET title = $1, category = $2, amount = $3, date = $4
            WHERE entry_id = $5 AND user_id = $6
            "#,
        )
        .bind(&update.title)
        .bind(update.category_id)
        .bind(update.amount)
        .bind(update.date)
        .bind(entry_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_entry(&self, owner_id: i32, entry_id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM financeentry WHERE entry_id = $1 AND user_id = $2")
            .bind(entry_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
