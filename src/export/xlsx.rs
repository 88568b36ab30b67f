// src/export/xlsx.rs

use crate::errors::{AppError, AppResult};
use crate::export::excel_date::date_to_excel_serial;
use crate::export::model::{ExportCell, ExportTable};
use crate::export::notify_export_success;
use crate::ui::messages::info;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use std::path::Path;
use unicode_width::UnicodeWidthStr;

/// Export XLSX con styling e auto-larghezza colonne.
pub(crate) fn export_xlsx(table: &ExportTable, path: &Path) -> AppResult<()> {
    info(format!("Exporting to XLSX: {}", path.display()));

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Habits").map_err(to_app_error)?;

    // ---------------------------
    // Header
    // ---------------------------
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(0x2F75B5))
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    for (col, header) in table.headers.iter().enumerate() {
        worksheet
            .write_with_format(0, col as u16, header.as_str(), &header_format)
            .map_err(to_app_error)?;
    }

    worksheet.set_freeze_panes(1, 0).ok();

    let mut col_widths: Vec<usize> = table
        .headers
        .iter()
        .map(|h| UnicodeWidthStr::width(h.as_str()))
        .collect();

    let band1 = Color::RGB(0xEAF3FB);
    let band2 = Color::RGB(0xFFFFFF);

    // ---------------------------
    // Righe
    // ---------------------------
    for (row_index, cells) in table.rows.iter().enumerate() {
        let row = (row_index + 1) as u32;
        let band = if row_index % 2 == 0 { band1 } else { band2 };

        for (col, cell) in cells.iter().enumerate() {
            write_cell(worksheet, row, col as u16, cell, band)?;

            let w = UnicodeWidthStr::width(cell.to_plain().as_str());
            if let Some(cw) = col_widths.get_mut(col) {
                *cw = (*cw).max(w);
            }
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet
            .set_column_width(c as u16, *w as f64 + 2.0)
            .map_err(to_app_error)?;
    }

    workbook.save(path).map_err(to_app_error)?;

    notify_export_success("XLSX", path);
    Ok(())
}

/// Scrive una singola cella secondo il suo tipo.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &ExportCell,
    bg: Color,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(bg)
        .set_pattern(FormatPattern::Solid)
        .set_border(FormatBorder::Thin);

    match cell {
        ExportCell::Date(d) => {
            let fmt = base.set_num_format("yyyy-mm-dd");
            worksheet
                .write_with_format(row, col, date_to_excel_serial(d), &fmt)
                .map_err(to_app_error)?;
        }
        ExportCell::Number(n) => {
            let fmt = base.set_align(FormatAlign::Right);
            worksheet
                .write_with_format(row, col, *n, &fmt)
                .map_err(to_app_error)?;
        }
        ExportCell::Bool(b) => {
            let fmt = base.set_align(FormatAlign::Center);
            worksheet
                .write_with_format(row, col, *b, &fmt)
                .map_err(to_app_error)?;
        }
        ExportCell::Text(s) => {
            worksheet
                .write_with_format(row, col, s.as_str(), &base)
                .map_err(to_app_error)?;
        }
        ExportCell::Empty => {
            worksheet
                .write_blank(row, col, &base)
                .map_err(to_app_error)?;
        }
    }

    Ok(())
}

fn to_app_error<E: std::fmt::Display>(e: E) -> AppError {
    AppError::Export(e.to_string())
}
