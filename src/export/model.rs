// src/export/model.rs

use crate::core::list::collect_keys;
use crate::models::{DailyLog, FieldValue, HabitCatalog};
use crate::utils::format_number;
use chrono::NaiveDate;

/// One typed cell of a flat export row.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ExportCell {
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
    Empty,
}

impl ExportCell {
    fn from_value(v: Option<&FieldValue>) -> Self {
        match v {
            Some(FieldValue::Bool(b)) => ExportCell::Bool(*b),
            Some(FieldValue::Number(n)) => ExportCell::Number(*n),
            Some(FieldValue::Text(s)) => ExportCell::Text(s.clone()),
            None => ExportCell::Empty,
        }
    }

    /// Plain text form, readable back by `import`.
    pub(crate) fn to_plain(&self) -> String {
        match self {
            ExportCell::Text(s) => s.clone(),
            ExportCell::Number(n) => format_number(*n),
            ExportCell::Bool(true) => "yes".into(),
            ExportCell::Bool(false) => "no".into(),
            ExportCell::Date(d) => d.format("%Y-%m-%d").to_string(),
            ExportCell::Empty => String::new(),
        }
    }
}

/// Flat table for CSV / XLSX: `user_id`, `date`, then one column per field.
#[derive(Debug, Clone)]
pub(crate) struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ExportCell>>,
}

impl ExportTable {
    pub(crate) fn from_logs(logs: &[DailyLog], catalog: &HabitCatalog) -> Self {
        let keys = collect_keys(logs, catalog);

        let mut headers = vec!["user_id".to_string(), "date".to_string()];
        headers.extend(keys.iter().cloned());

        let rows = logs
            .iter()
            .map(|l| {
                let mut row = vec![ExportCell::Text(l.user_id.clone()), ExportCell::Date(l.date)];
                row.extend(keys.iter().map(|k| ExportCell::from_value(l.get(k))));
                row
            })
            .collect();

        Self { headers, rows }
    }
}
