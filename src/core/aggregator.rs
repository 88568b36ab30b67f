//! Monthly bucketing of sparse daily logs into dense, chart-ready series.

use crate::errors::{AppError, AppResult};
use crate::models::{DailyLog, HabitCatalog};
use crate::utils::date::all_days_of_month;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// One calendar day of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPoint {
    pub date: NaiveDate,
    /// Field value as a number; 0 when absent.
    pub value: f64,
    /// False when no record carried the field on this day.
    pub recorded: bool,
}

/// Dense per-day series of one field over one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySeries {
    pub year: i32,
    pub month: u32,
    pub field: String,
    pub points: Vec<DayPoint>,
    pub total: f64,
    /// Days with a non-zero value.
    pub active_days: usize,
}

impl MonthlySeries {
    pub fn recorded_days(&self) -> usize {
        self.points.iter().filter(|p| p.recorded).count()
    }

    pub fn average(&self) -> Option<f64> {
        let n = self.recorded_days();
        (n > 0).then(|| self.total / n as f64)
    }

    /// Longest run of consecutive active days.
    pub fn best_streak(&self) -> usize {
        let mut best = 0;
        let mut cur = 0;
        for p in &self.points {
            if p.value != 0.0 {
                cur += 1;
                best = best.max(cur);
            } else {
                cur = 0;
            }
        }
        best
    }
}

pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Build the dense series of `field` for `year`/`month`.
    ///
    /// Records outside the month are ignored. When several records share a
    /// date the last one in `records` wins. Text values carry no number and
    /// count as absent.
    pub fn series(
        records: &[DailyLog],
        year: i32,
        month: u32,
        field: &str,
    ) -> AppResult<MonthlySeries> {
        let days = all_days_of_month(year, month);
        if days.is_empty() {
            return Err(AppError::InvalidPeriod(format!("{year:04}-{month:02}")));
        }

        let mut by_day: HashMap<u32, Option<f64>> = HashMap::new();
        for r in records
            .iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
        {
            // last-write-wins sui duplicati
            by_day.insert(r.date.day(), r.get(field).and_then(|v| v.as_number()));
        }

        let points: Vec<DayPoint> = days
            .into_iter()
            .map(|date| match by_day.get(&date.day()).copied().flatten() {
                Some(v) => DayPoint {
                    date,
                    value: v,
                    recorded: true,
                },
                None => DayPoint {
                    date,
                    value: 0.0,
                    recorded: false,
                },
            })
            .collect();

        let total = points.iter().map(|p| p.value).sum();
        let active_days = points.iter().filter(|p| p.value != 0.0).count();

        Ok(MonthlySeries {
            year,
            month,
            field: field.to_string(),
            points,
            total,
            active_days,
        })
    }

    /// One series per field present in the month: catalog order first,
    /// unknown fields alphabetically.
    pub fn summary(
        records: &[DailyLog],
        year: i32,
        month: u32,
        catalog: &HabitCatalog,
    ) -> AppResult<Vec<MonthlySeries>> {
        let keys: BTreeSet<String> = records
            .iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
            .flat_map(|r| {
                r.fields
                    .iter()
                    .filter(|(_, v)| v.as_number().is_some())
                    .map(|(k, _)| k.clone())
            })
            .collect();

        let mut keys: Vec<String> = keys.into_iter().collect();
        catalog.sort_keys(&mut keys);

        keys.iter()
            .map(|k| Self::series(records, year, month, k))
            .collect()
    }
}
