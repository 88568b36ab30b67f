//! Field normalization for spreadsheet imports and `add key=value` pairs.
//!
//! Headers are folded to snake_case and looked up in a synonym table built
//! from the habit catalog. Unknown headers pass through normalized but
//! unmapped. Cell values are coerced with fixed heuristics; nothing here
//! ever fails, blank input simply yields no value.

use crate::models::{FieldValue, HabitCatalog, HabitKind};
use std::collections::{BTreeMap, HashMap};

/// Fold a raw header into a snake_case key.
///
/// Every run of non-alphanumeric characters becomes a single `_`, leading
/// and trailing separators are dropped.
/// `"# of Bottles of Water Drank? "` → `of_bottles_of_water_drank`
pub fn normalize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_sep = false;

    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.extend(ch.to_lowercase().filter(|c| c.is_alphanumeric()));
        } else {
            pending_sep = true;
        }
    }

    out
}

fn bool_token(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" => Some(true),
        "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce a raw cell into a value.
///
/// - blank → `None`
/// - `yes/no/true/false/1/0` (any case) → `Bool`
/// - finite number → `Number`
/// - anything else → trimmed `Text`
pub fn coerce_value(raw: &str) -> Option<FieldValue> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(b) = bool_token(s) {
        return Some(FieldValue::Bool(b));
    }
    if let Some(n) = parse_number(s) {
        return Some(FieldValue::Number(n));
    }
    Some(FieldValue::Text(s.to_string()))
}

/// Header → canonical key mapping plus catalog-aware value coercion.
#[derive(Debug, Clone)]
pub struct FieldNormalizer {
    synonyms: HashMap<String, String>,
    kinds: HashMap<String, HabitKind>,
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new(&HabitCatalog::default())
    }
}

impl FieldNormalizer {
    pub fn new(catalog: &HabitCatalog) -> Self {
        let mut synonyms = HashMap::new();
        let mut kinds = HashMap::new();

        // canonical keys first: an alias can never shadow a real key
        for h in &catalog.habits {
            let key = normalize_key(&h.key);
            synonyms.insert(key.clone(), key.clone());
            kinds.insert(key, h.kind);
        }

        for h in &catalog.habits {
            let key = normalize_key(&h.key);
            let extra = std::iter::once(&h.label).chain(h.aliases.iter());
            for alias in extra {
                let a = normalize_key(alias);
                if !a.is_empty() {
                    synonyms.entry(a).or_insert_with(|| key.clone());
                }
            }
        }

        Self { synonyms, kinds }
    }

    /// Canonical key for a raw header. Idempotent.
    pub fn normalize_header(&self, raw: &str) -> String {
        let key = normalize_key(raw);
        match self.synonyms.get(&key) {
            Some(mapped) => mapped.clone(),
            None => key,
        }
    }

    /// Whether the header maps onto a catalog habit.
    pub fn is_known(&self, raw: &str) -> bool {
        self.kinds.contains_key(&self.normalize_header(raw))
    }

    pub fn kind_of(&self, key: &str) -> Option<HabitKind> {
        self.kinds.get(key).copied()
    }

    /// Coerce `raw` for the canonical field `key`.
    ///
    /// Known numeric habits keep `1`/`0` as numbers, notes keep text as typed,
    /// flags also accept `y`/`n`/`x`/`done`. Unknown keys use [`coerce_value`].
    pub fn coerce_for(&self, key: &str, raw: &str) -> Option<FieldValue> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        match self.kind_of(key) {
            Some(HabitKind::Count) | Some(HabitKind::Measure) => match parse_number(s) {
                Some(n) => Some(FieldValue::Number(n)),
                None => coerce_value(s),
            },
            Some(HabitKind::Note) => Some(FieldValue::Text(s.to_string())),
            Some(HabitKind::Flag) => match s.to_ascii_lowercase().as_str() {
                "y" | "x" | "done" => Some(FieldValue::Bool(true)),
                "n" => Some(FieldValue::Bool(false)),
                _ => coerce_value(s),
            },
            None => coerce_value(s),
        }
    }

    /// Normalize a whole spreadsheet row; blank cells are dropped.
    ///
    /// When two headers fold onto the same key the later column wins.
    pub fn normalize_row<H, C>(&self, cells: &[(H, C)]) -> BTreeMap<String, FieldValue>
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let mut out = BTreeMap::new();
        for (header, cell) in cells {
            let key = self.normalize_header(header.as_ref());
            if key.is_empty() {
                continue;
            }
            if let Some(v) = self.coerce_for(&key, cell.as_ref()) {
                out.insert(key, v);
            }
        }
        out
    }
}
