// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::model::ExportTable;
use crate::export::notify_export_success;
use crate::models::DailyLog;
use crate::ui::messages::info;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed (the same shape `restore` reads back).
pub(crate) fn export_json(logs: &[DailyLog], path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(logs)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV with a header row; the file can be fed back to `import`.
pub(crate) fn export_csv(table: &ExportTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&table.headers)?;

    for row in &table.rows {
        wtr.write_record(row.iter().map(|c| c.to_plain()))?;
    }

    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}
