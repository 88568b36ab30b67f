use super::value::FieldValue;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One user's habits for one calendar date.
///
/// Identity is `(user_id, date)`; the database enforces one row per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: i64, // ⇔ daily_logs.id (0 = not yet stored)
    pub user_id: String,  // ⇔ daily_logs.user_id
    pub date: NaiveDate,  // ⇔ daily_logs.log_date (TEXT "YYYY-MM-DD")
    pub fields: BTreeMap<String, FieldValue>, // ⇔ daily_logs.fields (JSON object)
    #[serde(default = "default_source")]
    pub source: String, // 'cli' | 'import' | 'restore'
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

fn default_source() -> String {
    "cli".to_string()
}

impl DailyLog {
    pub fn new(user_id: &str, date: NaiveDate, source: &str) -> Self {
        let now = Local::now().to_rfc3339();
        Self {
            id: 0,
            user_id: user_id.to_string(),
            date,
            fields: BTreeMap::new(),
            source: source.to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    pub fn with_fields(mut self, fields: BTreeMap<String, FieldValue>) -> Self {
        self.fields = fields;
        self
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

/// A partial update of a log's fields: `Some` sets, `None` removes.
pub type FieldPatch = BTreeMap<String, Option<FieldValue>>;
