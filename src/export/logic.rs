// src/export/logic.rs

use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::{LogQuery, load_logs};
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::ExportTable;
use crate::export::range::parse_range;
use crate::export::xlsx::export_xlsx;
use crate::models::HabitCatalog;
use crate::ui::messages::warning;
use chrono::NaiveDate;
use std::path::Path;

/// Logica di alto livello per l'export.
pub struct ExportLogic;

impl ExportLogic {
    /// Export daily logs.
    ///
    /// - `format`: csv | json | xlsx
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a period (`YYYY`, `YYYY-MM`,
    ///   `YYYY-MM-DD`, or two of them joined by `:`)
    /// - `user`: `None` exports every user
    ///
    /// Returns the number of exported records.
    pub fn export(
        pool: &mut DbPool,
        catalog: &HabitCatalog,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        user: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let bounds: Option<(NaiveDate, NaiveDate)> = match range {
            None => None,
            Some(r) if r.eq_ignore_ascii_case("all") => None,
            Some(r) => Some(parse_range(r)?),
        };

        let query = user
            .map(LogQuery::for_user)
            .unwrap_or_default()
            .bounds(bounds);
        let logs = load_logs(&pool.conn, &query)?;

        if logs.is_empty() {
            warning("No logs found for selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        match format {
            ExportFormat::Json => export_json(&logs, path)?,
            ExportFormat::Csv => export_csv(&ExportTable::from_logs(&logs, catalog), path)?,
            ExportFormat::Xlsx => export_xlsx(&ExportTable::from_logs(&logs, catalog), path)?,
        }

        ttlog_or_warn(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} records as {}", logs.len(), format.as_str()),
        );

        Ok(logs.len())
    }
}
