//! Schema migrations.
//!
//! Each schema version is recorded in the `log` table as a
//! `migration_applied` row; every step is idempotent.

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use rusqlite::{Connection, OptionalExtension};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> AppResult<bool> {
    let exists: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(exists.is_some())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> AppResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn migration_applied(conn: &Connection, version: &str) -> AppResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM log
             WHERE operation = 'migration_applied' AND target = ?1
             LIMIT 1",
            [version],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    success(format!("Migration applied: {} → {}", version, message));
    Ok(())
}

/// Create the `daily_logs` table. One row per (user, day).
fn create_daily_logs_table(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS daily_logs (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     TEXT NOT NULL,
            log_date    TEXT NOT NULL CHECK(date(log_date) IS NOT NULL),
            fields      TEXT NOT NULL DEFAULT '{}' CHECK(json_valid(fields)),
            source      TEXT NOT NULL DEFAULT 'cli',
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            UNIQUE(user_id, log_date)
        );

        CREATE INDEX IF NOT EXISTS idx_daily_logs_user_date ON daily_logs(user_id, log_date);
        CREATE INDEX IF NOT EXISTS idx_daily_logs_date ON daily_logs(log_date);
        "#,
    )?;
    Ok(())
}

/// `source` (cli / import / restore) must exist even on hand-made tables.
fn ensure_source_column(conn: &Connection) -> AppResult<()> {
    if has_column(conn, "daily_logs", "source")? {
        return Ok(());
    }

    conn.execute(
        "ALTER TABLE daily_logs ADD COLUMN source TEXT NOT NULL DEFAULT 'cli'",
        [],
    )
    .map_err(|e| AppError::Migration(format!("Failed to add 'source' column: {}", e)))?;

    warning("Added missing 'source' column to daily_logs.");
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invocata da db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    let version = "0001_daily_logs_schema";
    if !table_exists(conn, "daily_logs")? {
        create_daily_logs_table(conn)?;
        success("Created daily_logs table.");
    }
    if !migration_applied(conn, version)? {
        mark_applied(conn, version, "daily_logs with source and date indexes")?;
    }

    ensure_source_column(conn)?;

    Ok(())
}
