use crate::errors::{AppError, AppResult};
use crate::models::{DailyLog, FieldPatch, FieldValue};
use chrono::{Local, NaiveDate};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use std::collections::BTreeMap;

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, log_date, fields, source, created_at, updated_at FROM daily_logs";

/// Row filters for `daily_logs`: equality on user, date range, ordering, limit.
#[derive(Debug, Clone, Default)]
pub struct LogQuery {
    pub user: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub descending: bool,
    pub limit: Option<usize>,
}

impl LogQuery {
    pub fn for_user(user: &str) -> Self {
        Self {
            user: Some(user.to_string()),
            ..Self::default()
        }
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn bounds(mut self, bounds: Option<(NaiveDate, NaiveDate)>) -> Self {
        if let Some((from, to)) = bounds {
            self = self.between(from, to);
        }
        self
    }

    pub fn newest_first(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    fn to_sql(&self) -> (String, Vec<String>) {
        let mut clauses = Vec::new();
        let mut args = Vec::new();

        if let Some(u) = &self.user {
            args.push(u.clone());
            clauses.push(format!("user_id = ?{}", args.len()));
        }
        if let Some(f) = self.from {
            args.push(f.format("%Y-%m-%d").to_string());
            clauses.push(format!("log_date >= ?{}", args.len()));
        }
        if let Some(t) = self.to {
            args.push(t.format("%Y-%m-%d").to_string());
            clauses.push(format!("log_date <= ?{}", args.len()));
        }

        let mut sql = SELECT_COLUMNS.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }

        let dir = if self.descending { "DESC" } else { "ASC" };
        sql.push_str(&format!(" ORDER BY log_date {dir}, user_id ASC"));

        if let Some(n) = self.limit {
            sql.push_str(&format!(" LIMIT {n}"));
        }

        (sql, args)
    }
}

pub fn map_row(row: &Row) -> rusqlite::Result<DailyLog> {
    let date_str: String = row.get("log_date")?;
    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let raw_fields: String = row.get("fields")?;
    let fields: BTreeMap<String, FieldValue> = serde_json::from_str(&raw_fields)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(DailyLog {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date,
        fields,
        source: row.get("source")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn load_logs(conn: &Connection, query: &LogQuery) -> AppResult<Vec<DailyLog>> {
    let (sql, args) = query.to_sql();
    let mut stmt = conn.prepare(&sql)?;

    let params: Vec<&dyn ToSql> = args.iter().map(|s| s as &dyn ToSql).collect();
    let rows = stmt.query_map(rusqlite::params_from_iter(params), map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_log(conn: &Connection, user: &str, date: &NaiveDate) -> AppResult<Option<DailyLog>> {
    let sql = format!("{SELECT_COLUMNS} WHERE user_id = ?1 AND log_date = ?2");
    let log = conn
        .query_row(
            &sql,
            params![user, date.format("%Y-%m-%d").to_string()],
            map_row,
        )
        .optional()?;
    Ok(log)
}

/// Insert the day if missing, otherwise merge `patch` into the stored fields.
///
/// `None` entries in the patch remove the field (JSON merge-patch null).
pub fn upsert_log(
    conn: &Connection,
    user: &str,
    date: &NaiveDate,
    patch: &FieldPatch,
    source: &str,
) -> AppResult<()> {
    let patch_json = serde_json::to_string(patch)?;
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO daily_logs (user_id, log_date, fields, source, created_at, updated_at)
         VALUES (?1, ?2, json_patch('{}', ?3), ?4, ?5, ?5)
         ON CONFLICT(user_id, log_date) DO UPDATE SET
             fields = json_patch(daily_logs.fields, ?3),
             updated_at = ?5",
    )?;

    stmt.execute(params![
        user,
        date.format("%Y-%m-%d").to_string(),
        patch_json,
        source,
        now
    ])?;
    Ok(())
}

/// Upsert a whole record, setting every field it carries.
pub fn upsert_record(conn: &Connection, log: &DailyLog) -> AppResult<()> {
    let patch: FieldPatch = log
        .fields
        .iter()
        .map(|(k, v)| (k.clone(), Some(v.clone())))
        .collect();
    upsert_log(conn, &log.user_id, &log.date, &patch, &log.source)
}

pub fn delete_log(conn: &Connection, user: &str, date: &NaiveDate) -> AppResult<usize> {
    let n = conn.execute(
        "DELETE FROM daily_logs WHERE user_id = ?1 AND log_date = ?2",
        params![user, date.format("%Y-%m-%d").to_string()],
    )?;
    Ok(n)
}

/// Bulk administrative clear. `None` clears every user.
pub fn clear_logs(conn: &Connection, user: Option<&str>) -> AppResult<usize> {
    let n = match user {
        Some(u) => conn.execute("DELETE FROM daily_logs WHERE user_id = ?1", [u])?,
        None => conn.execute("DELETE FROM daily_logs", [])?,
    };
    Ok(n)
}

pub fn count_logs(conn: &Connection, user: Option<&str>) -> AppResult<i64> {
    let n = match user {
        Some(u) => conn.query_row(
            "SELECT COUNT(*) FROM daily_logs WHERE user_id = ?1",
            [u],
            |r| r.get(0),
        )?,
        None => conn.query_row("SELECT COUNT(*) FROM daily_logs", [], |r| r.get(0))?,
    };
    Ok(n)
}
