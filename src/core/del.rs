use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{clear_logs, delete_log};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Remove one user's record for `date`.
    pub fn apply(pool: &mut DbPool, user: &str, date: NaiveDate) -> AppResult<()> {
        let removed = delete_log(&pool.conn, user, &date)?;

        if removed == 0 {
            return Err(AppError::NoLogForDate {
                user: user.to_string(),
                date: date.format("%Y-%m-%d").to_string(),
            });
        }

        ttlog_or_warn(&pool.conn, "del", &format!("{user}@{date}"), "Deleted daily log");
        Ok(())
    }

    /// Bulk administrative clear: every record of `user`, or of everyone.
    pub fn clear(pool: &mut DbPool, user: Option<&str>) -> AppResult<usize> {
        let removed = pool.with_transaction(|tx| clear_logs(tx, user))?;

        let target = user.unwrap_or("*");
        ttlog_or_warn(
            &pool.conn,
            "clear",
            target,
            &format!("Removed {} daily logs", removed),
        );

        Ok(removed)
    }
}
