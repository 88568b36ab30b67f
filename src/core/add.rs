use crate::core::normalizer::FieldNormalizer;
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{load_log, upsert_log};
use crate::errors::{AppError, AppResult};
use crate::models::{DailyLog, FieldPatch, HabitCatalog};
use crate::ui::messages::success;
use chrono::NaiveDate;

/// Split `key=value` command-line pairs. `key=` means "remove the field".
pub fn parse_assignments(raw: &[String]) -> AppResult<Vec<(String, String)>> {
    raw.iter()
        .map(|a| {
            let (k, v) = a
                .split_once('=')
                .ok_or_else(|| AppError::InvalidAssignment(format!("'{}' (expected key=value)", a)))?;
            if k.trim().is_empty() {
                return Err(AppError::InvalidAssignment(format!("'{}' (empty key)", a)));
            }
            Ok((k.to_string(), v.to_string()))
        })
        .collect()
}

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Turn raw assignments into a validated patch.
    pub fn build_patch(
        assignments: &[(String, String)],
        catalog: &HabitCatalog,
    ) -> AppResult<FieldPatch> {
        let normalizer = FieldNormalizer::new(catalog);
        let mut patch = FieldPatch::new();

        for (raw_key, raw_value) in assignments {
            let key = normalizer.normalize_header(raw_key);
            if key.is_empty() {
                return Err(AppError::InvalidAssignment(format!(
                    "'{}' has no usable characters",
                    raw_key
                )));
            }

            let value = normalizer.coerce_for(&key, raw_value);
            if let Some(v) = &value {
                catalog.validate(&key, v)?;
            }
            patch.insert(key, value);
        }

        Ok(patch)
    }

    /// Upsert the day for `user` and return the stored record.
    pub fn apply(
        pool: &mut DbPool,
        catalog: &HabitCatalog,
        user: &str,
        date: NaiveDate,
        assignments: &[(String, String)],
    ) -> AppResult<DailyLog> {
        if assignments.is_empty() {
            return Err(AppError::NothingToDo(
                "specify at least one key=value pair".into(),
            ));
        }

        let patch = Self::build_patch(assignments, catalog)?;
        let existed = load_log(&pool.conn, user, &date)?.is_some();

        // solo rimozioni su un giorno mai loggato: niente riga vuota
        if !existed && patch.values().all(Option::is_none) {
            return Err(AppError::NoLogForDate {
                user: user.to_string(),
                date: date.to_string(),
            });
        }

        upsert_log(&pool.conn, user, &date, &patch, "cli")?;

        let stored = load_log(&pool.conn, user, &date)?.ok_or_else(|| AppError::NoLogForDate {
            user: user.to_string(),
            date: date.to_string(),
        })?;

        let summary = patch
            .iter()
            .map(|(k, v)| match v {
                Some(v) => format!("{k}={v}"),
                None => format!("{k} removed"),
            })
            .collect::<Vec<_>>()
            .join(", ");

        ttlog_or_warn(
            &pool.conn,
            if existed { "edit" } else { "add" },
            &format!("{user}@{date}"),
            &summary,
        );

        let (icon, verb) = if existed { ("✏️", "Updated") } else { ("📝", "Logged") };
        success(format!("{} {} {} for {}: {}", icon, verb, date, user, summary));

        Ok(stored)
    }
}
