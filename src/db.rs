//! Database module
//!
//! Database connectivity, schema verification and bundled migrations.

use sqlx::{Executor, PgPool};

/// Bundled migrations, applied in order. Each script is idempotent.
const MIGRATIONS: &[(&str, &str)] = &[
    ("0001_init", include_str!("../migrations/0001_init.sql")),
    (
        "0002_seed_categories",
        include_str!("../migrations/0002_seed_categories.sql"),
    ),
];

/// Tables the store reads and writes
const REQUIRED_TABLES: &[&str] = &["accountuser", "category", "financeentry"];

/// Simple connectivity check
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the bundled migrations
pub async fn apply_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    for (name, sql) in MIGRATIONS {
        // Unparameterized, so each script runs over the simple query protocol
        pool.execute(*sql).await?;
        tracing::info!("Applied migration {}", name);
    }
    Ok(())
}

/// Check if required tables exist
pub async fn check_schema(pool: &PgPool) -> Result<bool, sqlx::Error> {
    for table in REQUIRED_TABLES {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM information_schema.tables
                WHERE table_schema = 'public' AND table_name = $1
            )
            "#,
        )
        .bind(table)
        .fetch_one(pool)
        .await?;

        if !exists {
            tracing::error!("Required table '{}' does not exist", table);
            return Ok(false);
        }
    }

    if !check_category_index(pool).await? {
        return Ok(false);
    }

    Ok(true)
}

/// Lookup-or-create needs a unique index on `category.name`
async fn check_category_index(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM pg_indexes
            WHERE schemaname = 'public' AND tablename = 'category'
              AND indexdef ILIKE 'CREATE UNIQUE INDEX%(name)%'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !exists {
        tracing::error!("Unique index on category(name) is missing. Please run migrations.");
    }
    Ok(exists)
}
