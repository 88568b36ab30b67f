use crate::core::aggregator::{MonthlyAggregator, MonthlySeries};
use crate::core::normalizer::FieldNormalizer;
use crate::db::pool::DbPool;
use crate::db::queries::{LogQuery, load_logs};
use crate::errors::{AppError, AppResult};
use crate::models::HabitCatalog;
use crate::ui::messages::{header, warning};
use crate::utils::colors::{CYAN, GREY, RESET};
use crate::utils::date::{month_bounds, month_name};
use crate::utils::format_number;
use crate::utils::table::Table;

/// Output style for the monthly report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthOutput {
    Table,
    Json,
}

pub struct MonthLogic;

impl MonthLogic {
    /// Load one user's month and aggregate it.
    ///
    /// With `field` the result holds exactly that series; otherwise one
    /// series per numeric field logged in the month.
    pub fn build(
        pool: &mut DbPool,
        catalog: &HabitCatalog,
        user: &str,
        year: i32,
        month: u32,
        field: Option<&str>,
    ) -> AppResult<Vec<MonthlySeries>> {
        let (first, last) = month_bounds(year, month)
            .ok_or_else(|| AppError::InvalidPeriod(format!("{year:04}-{month:02}")))?;

        let logs = load_logs(&pool.conn, &LogQuery::for_user(user).between(first, last))?;

        match field {
            Some(f) => {
                let key = FieldNormalizer::new(catalog).normalize_header(f);
                Ok(vec![MonthlyAggregator::series(&logs, year, month, &key)?])
            }
            None => MonthlyAggregator::summary(&logs, year, month, catalog),
        }
    }

    pub fn print(
        series: &[MonthlySeries],
        catalog: &HabitCatalog,
        output: MonthOutput,
        separator: char,
    ) -> AppResult<()> {
        if output == MonthOutput::Json {
            println!("{}", serde_json::to_string_pretty(series)?);
            return Ok(());
        }

        let Some(first) = series.first() else {
            warning("No numeric habits logged in this month.");
            return Ok(());
        };

        header(format!("{} {}", month_name(first.month), first.year));

        if let [single] = series {
            print_days(single, separator);
        } else {
            print_summary(series, catalog, separator);
        }
        Ok(())
    }
}

fn print_days(s: &MonthlySeries, separator: char) {
    let mut table = Table::new(vec!["date", s.field.as_str()], separator);
    for p in &s.points {
        let value = if p.recorded {
            format_number(p.value)
        } else {
            format!("{GREY}--{RESET}")
        };
        table.add_row(vec![p.date.format("%a %d").to_string(), value]);
    }
    println!("{}", table.render());
    println!(
        "{CYAN}• Total:{RESET} {}   {CYAN}• Active days:{RESET} {}/{}",
        format_number(s.total),
        s.active_days,
        s.points.len()
    );
}

fn print_summary(series: &[MonthlySeries], catalog: &HabitCatalog, separator: char) {
    let mut table = Table::new(
        vec!["habit", "total", "active days", "average", "best streak"],
        separator,
    );
    for s in series {
        let label = catalog
            .get(&s.field)
            .map(|h| h.display_label().to_string())
            .unwrap_or_else(|| s.field.clone());
        table.add_row(vec![
            label,
            format_number(s.total),
            format!("{}/{}", s.active_days, s.points.len()),
            s.average().map(format_number).unwrap_or_else(|| "--".into()),
            s.best_streak().to_string(),
        ]);
    }
    println!("{}", table.render());
}
