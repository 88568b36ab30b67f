use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;
use std::time::Duration;

/// Prepare a freshly opened connection for habitlog.
///
/// Sets the connection pragmas, then lets the migration engine create or
/// upgrade the `log` and `daily_logs` tables.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    run_pending_migrations(conn)
}
