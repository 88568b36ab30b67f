use crate::core::normalizer::{FieldNormalizer, normalize_key};
use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::upsert_record;
use crate::errors::{AppError, AppResult};
use crate::models::{DailyLog, HabitCatalog};
use crate::ui::messages::{info, success, warning};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

/// Normalized headers accepted as the date column.
const DATE_COLUMNS: [&str; 4] = ["date", "log_date", "day", "timestamp"];
/// Normalized headers accepted as the user column.
const USER_COLUMNS: [&str; 3] = ["user_id", "user", "username"];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse the date cell of a spreadsheet export. Time parts are dropped.
pub fn parse_import_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Outcome of a CSV import.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
    /// Headers that did not map onto a catalog habit (kept as-is).
    pub unmapped: Vec<String>,
}

/// Rows parsed from a CSV source, not yet stored.
#[derive(Debug, Default)]
pub struct ParsedImport {
    pub records: Vec<DailyLog>,
    pub skipped: usize,
    pub unmapped: Vec<String>,
}

pub struct ImportLogic;

impl ImportLogic {
    /// Parse a CSV stream into daily logs.
    ///
    /// Any row-level failure (bad record, missing or invalid date, negative
    /// count, no values) skips the row and bumps `skipped`.
    pub fn parse<R: Read>(
        reader: R,
        catalog: &HabitCatalog,
        default_user: &str,
    ) -> AppResult<ParsedImport> {
        let normalizer = FieldNormalizer::new(catalog);

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let normalized: Vec<String> = headers.iter().map(|h| normalize_key(h)).collect();

        // priorità nell'ordine di DATE_COLUMNS: "Date" batte il "Timestamp" dei moduli
        let date_col = DATE_COLUMNS
            .iter()
            .find_map(|c| normalized.iter().position(|h| h.as_str() == *c))
            .ok_or_else(|| {
                AppError::Import(format!(
                    "no date column found (expected one of: {})",
                    DATE_COLUMNS.join(", ")
                ))
            })?;
        let user_col = USER_COLUMNS
            .iter()
            .find_map(|c| normalized.iter().position(|h| h.as_str() == *c));

        // every date-like or user-like column is metadata, never a habit field
        let is_field_col = |i: usize| {
            let h = normalized[i].as_str();
            !DATE_COLUMNS.contains(&h) && !USER_COLUMNS.contains(&h)
        };

        let unmapped: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| is_field_col(*i) && !h.is_empty() && !normalizer.is_known(h))
            .map(|(_, h)| normalizer.normalize_header(h))
            .collect();

        let mut out = ParsedImport {
            unmapped,
            ..ParsedImport::default()
        };

        for result in rdr.records() {
            let Ok(record) = result else {
                out.skipped += 1;
                continue;
            };

            let Some(date) = record.get(date_col).and_then(parse_import_date) else {
                out.skipped += 1;
                continue;
            };

            let user = user_col
                .and_then(|c| record.get(c))
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .unwrap_or(default_user);

            let cells: Vec<(&str, &str)> = headers
                .iter()
                .zip(record.iter())
                .enumerate()
                .filter(|(i, _)| is_field_col(*i))
                .map(|(_, (h, v))| (h.as_str(), v))
                .collect();

            let fields = normalizer.normalize_row(&cells);
            if fields.is_empty() || fields.iter().any(|(k, v)| catalog.validate(k, v).is_err()) {
                out.skipped += 1;
                continue;
            }

            out.records
                .push(DailyLog::new(user, date, "import").with_fields(fields));
        }

        Ok(out)
    }

    /// Import a CSV file into the database (one transaction).
    pub fn apply(
        pool: &mut DbPool,
        path: &Path,
        catalog: &HabitCatalog,
        user: &str,
        dry_run: bool,
    ) -> AppResult<ImportReport> {
        if !path.exists() {
            return Err(AppError::Import(format!("file not found: {}", path.display())));
        }

        info(format!("Importing {}", path.display()));

        let file = std::fs::File::open(path)?;
        let parsed = Self::parse(file, catalog, user)?;

        if !parsed.unmapped.is_empty() {
            warning(format!(
                "Unmapped columns kept as-is: {}",
                parsed.unmapped.join(", ")
            ));
        }

        let report = ImportReport {
            imported: parsed.records.len(),
            skipped: parsed.skipped,
            unmapped: parsed.unmapped.clone(),
        };

        if dry_run {
            info(format!(
                "Dry run: {} rows would be imported, {} skipped.",
                report.imported, report.skipped
            ));
            return Ok(report);
        }

        pool.with_transaction(|tx| {
            for rec in &parsed.records {
                upsert_record(tx, rec)?;
            }
            Ok(())
        })?;

        ttlog_or_warn(
            &pool.conn,
            "import",
            &path.to_string_lossy(),
            &format!("imported {} rows, skipped {}", report.imported, report.skipped),
        );

        success(format!(
            "Imported {} rows ({} skipped) from {}.",
            report.imported,
            report.skipped,
            path.display()
        ));

        Ok(report)
    }
}
