// src/export/excel_date.rs

use chrono::NaiveDate;

/// Excel serial number of a calendar date (1900 date system).
pub(crate) fn date_to_excel_serial(d: &NaiveDate) -> f64 {
    // Excel considera il 1900 bisestile: l'epoca effettiva è il 1899-12-30
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30).unwrap_or_default();
    (*d - epoch).num_days() as f64
}
