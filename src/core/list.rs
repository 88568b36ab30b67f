use crate::db::pool::DbPool;
use crate::db::queries::{LogQuery, load_logs};
use crate::errors::AppResult;
use crate::models::{DailyLog, FieldValue, HabitCatalog};
use crate::ui::messages::warning;
use crate::utils::colors::{colorize_flag, colorize_optional};
use crate::utils::table::Table;
use chrono::NaiveDate;
use std::collections::BTreeSet;

pub struct ListLogic;

/// Every field key present in `logs`, catalog order first.
pub fn collect_keys(logs: &[DailyLog], catalog: &HabitCatalog) -> Vec<String> {
    let keys: BTreeSet<String> = logs
        .iter()
        .flat_map(|l| l.fields.keys().cloned())
        .collect();
    let mut keys: Vec<String> = keys.into_iter().collect();
    catalog.sort_keys(&mut keys);
    keys
}

fn render_cell(v: Option<&FieldValue>) -> String {
    match v {
        Some(FieldValue::Bool(b)) => colorize_flag(*b),
        Some(other) => other.to_string(),
        None => colorize_optional(None),
    }
}

impl ListLogic {
    pub fn print(
        pool: &mut DbPool,
        catalog: &HabitCatalog,
        user: Option<&str>,
        bounds: Option<(NaiveDate, NaiveDate)>,
        last: Option<usize>,
        separator: char,
    ) -> AppResult<usize> {
        let mut query = user
            .map(LogQuery::for_user)
            .unwrap_or_default()
            .bounds(bounds);
        if let Some(n) = last {
            query = query.newest_first().limit(n);
        }

        let mut logs = load_logs(&pool.conn, &query)?;
        if last.is_some() {
            // stampa sempre in ordine cronologico
            logs.reverse();
        }

        if logs.is_empty() {
            match bounds {
                Some((from, to)) => warning(format!("No logs between {} and {}.", from, to)),
                None => warning("No logs found."),
            }
            return Ok(0);
        }

        let keys = collect_keys(&logs, catalog);
        let show_user = user.is_none();

        let mut headers: Vec<String> = vec!["date".into()];
        if show_user {
            headers.push("user".into());
        }
        headers.extend(keys.iter().map(|k| {
            catalog
                .get(k)
                .map(|h| h.display_label().to_string())
                .unwrap_or_else(|| k.clone())
        }));

        let mut table = Table::new(headers, separator);
        for log in &logs {
            let mut row = vec![log.date_str()];
            if show_user {
                row.push(log.user_id.clone());
            }
            row.extend(keys.iter().map(|k| render_cell(log.get(k))));
            table.add_row(row);
        }

        println!("{}", table.render());
        println!("{} day(s) logged.", logs.len());

        Ok(logs.len())
    }
}
