//! Schema migrations.
//!
//! The base tables ship as SQL files embedded with `sqlx::migrate!`. Column
//! additions that must tolerate an already-patched schema run as code steps
//! afterwards, each one probing the live schema before changing it.

use sqlx::{SqliteConnection, SqlitePool};

use crate::domain::DeckError;

pub const STACKS_TABLE: &str = "deck_stacks";
pub const STALENESS_GRADIENT_COLUMN: &str = "staleness_gradient_enabled";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaChange {
    Changed,
    Unchanged,
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), DeckError> {
    sqlx::migrate!("./migrations").run(pool).await?;

    let changed = add_staleness_gradient_column(pool).await? == SchemaChange::Changed;
    tracing::info!(
        table = STACKS_TABLE,
        column = STALENESS_GRADIENT_COLUMN,
        changed,
        "Staleness gradient migration step finished"
    );

    Ok(())
}

/// Adds `deck_stacks.staleness_gradient_enabled` unless it already exists.
pub async fn add_staleness_gradient_column(pool: &SqlitePool) -> Result<SchemaChange, DeckError> {
    let mut tx = pool.begin().await?;

    if !table_exists(&mut *tx, STACKS_TABLE).await? {
        return Err(DeckError::NotFound(format!("Table not found: {}", STACKS_TABLE)));
    }

    if column_exists(&mut *tx, STACKS_TABLE, STALENESS_GRADIENT_COLUMN).await? {
        tracing::debug!(column = STALENESS_GRADIENT_COLUMN, "Column already present, skipping");
        return Ok(SchemaChange::Unchanged);
    }

    // SQLite requires a non-null default when adding a NOT NULL column
    sqlx::query(&format!(
        "ALTER TABLE {} ADD COLUMN {} BOOLEAN NOT NULL DEFAULT 0",
        STACKS_TABLE, STALENESS_GRADIENT_COLUMN
    ))
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(SchemaChange::Changed)
}

pub async fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool, DeckError> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(table)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(found.is_some())
}

pub async fn column_exists(
    conn: &mut SqliteConnection,
    table: &str,
    column: &str,
) -> Result<bool, DeckError> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT 1 FROM pragma_table_info(?) WHERE name = ?")
            .bind(table)
            .bind(column)
            .fetch_optional(&mut *conn)
            .await?;

    Ok(found.is_some())
}
