use super::value::FieldValue;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// How a habit is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HabitKind {
    /// Done / not done.
    Flag,
    /// Non-negative count (bottles, pages, minutes).
    Count,
    /// Any number (hours slept, weight).
    Measure,
    /// Short free-form text (rating, note).
    Note,
}

impl HabitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HabitKind::Flag => "flag",
            HabitKind::Count => "count",
            HabitKind::Measure => "measure",
            HabitKind::Note => "note",
        }
    }
}

/// A known habit: canonical key plus the spreadsheet headers that map onto it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitDef {
    pub key: String,
    pub kind: HabitKind,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl HabitDef {
    pub fn new(key: &str, kind: HabitKind, label: &str, aliases: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            kind,
            label: label.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            &self.key
        } else {
            &self.label
        }
    }
}

/// Ordered set of known habits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitCatalog {
    pub habits: Vec<HabitDef>,
}

impl Default for HabitCatalog {
    fn default() -> Self {
        use HabitKind::*;

        Self {
            habits: vec![
                HabitDef::new("coffee", Flag, "Coffee", &["had coffee", "coffee today"]),
                HabitDef::new(
                    "water_bottles_count",
                    Count,
                    "Water bottles",
                    &[
                        "# of Bottles of Water Drank?",
                        "bottles of water",
                        "water bottles",
                        "water",
                    ],
                ),
                HabitDef::new("walk", Flag, "Walk", &["went for a walk", "walked"]),
                HabitDef::new(
                    "walk_minutes",
                    Count,
                    "Walk minutes",
                    &["minutes walked", "walk duration"],
                ),
                HabitDef::new(
                    "pages_read",
                    Count,
                    "Pages read",
                    &["number of pages read", "pages"],
                ),
                HabitDef::new("workout", Flag, "Workout", &["exercise", "exercised"]),
                HabitDef::new(
                    "sleep_hours",
                    Measure,
                    "Sleep hours",
                    &["hours of sleep", "sleep"],
                ),
                HabitDef::new("mood", Note, "Mood", &["how was your day", "rating"]),
                HabitDef::new("notes", Note, "Notes", &["note", "comments"]),
            ],
        }
    }
}

impl HabitCatalog {
    pub fn get(&self, key: &str) -> Option<&HabitDef> {
        self.habits.iter().find(|h| h.key == key)
    }

    pub fn kind_of(&self, key: &str) -> Option<HabitKind> {
        self.get(key).map(|h| h.kind)
    }

    /// Position of `key` in the catalog, used to order columns and reports.
    pub fn position(&self, key: &str) -> Option<usize> {
        self.habits.iter().position(|h| h.key == key)
    }

    /// Counts and measures hold numbers only; counts never go below zero.
    pub fn validate(&self, key: &str, value: &FieldValue) -> AppResult<()> {
        let invalid = |reason: String| AppError::InvalidValue {
            field: key.to_string(),
            reason,
        };

        match (self.kind_of(key), value) {
            (Some(HabitKind::Count), FieldValue::Number(n)) if *n < 0.0 => {
                Err(invalid(format!("count cannot be negative ({})", n)))
            }
            (Some(kind @ (HabitKind::Count | HabitKind::Measure)), other)
                if !matches!(other, FieldValue::Number(_)) =>
            {
                Err(invalid(format!(
                    "{} expects a number, got '{}'",
                    kind.as_str(),
                    other
                )))
            }
            _ => Ok(()),
        }
    }

    /// Sort field keys: catalog order first, unknown keys alphabetically after.
    pub fn sort_keys(&self, keys: &mut [String]) {
        keys.sort_by(|a, b| match (self.position(a), self.position(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.cmp(b),
        });
    }
}
