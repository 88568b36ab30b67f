// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::month_bounds;
use chrono::NaiveDate;

/// Bounds of a single period token: `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidPeriod(p.to_string());

    match p.len() {
        // YYYY
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let d1 = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let d2 = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((d1, d2))
        }
        // YYYY-MM
        7 => {
            let y: i32 = p.get(0..4).ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
            let m: u32 = p.get(5..7).ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
            if p.as_bytes()[4] != b'-' {
                return Err(invalid());
            }
            month_bounds(y, m).ok_or_else(invalid)
        }
        // YYYY-MM-DD
        10 => {
            let d = NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid())?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

/// Parse a period (`--range` / `--period`).
///
/// Supporta:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any two of the above joined by `:` (e.g. `2024-09:2025-03`)
pub(crate) fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let (start, _) = period_bounds(start_raw.trim())?;
        let (_, end) = period_bounds(end_raw.trim())?;

        if start > end {
            return Err(AppError::InvalidPeriod(format!(
                "{r}: start is after end"
            )));
        }
        return Ok((start, end));
    }

    period_bounds(r)
}
