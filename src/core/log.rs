use crate::db::log::{LogEntry, load_entries};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::table::visible_width;
use ansi_term::Colour;

const OP_COLUMN_MAX: usize = 60;

/// Restituisce il colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" | "clear" => Colour::Red,
        "edit" => Colour::Yellow,
        "import" | "restore" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "backup" | "export" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51), // arancione
        _ => Colour::White,
    }
}

/// `operation (target)` with only the operation coloured, cut to the column width.
fn op_cell(e: &LogEntry) -> String {
    let plain = if e.target.is_empty() {
        e.operation.clone()
    } else {
        format!("{} ({})", e.operation, e.target)
    };

    let visible = if plain.chars().count() > OP_COLUMN_MAX {
        let mut s: String = plain.chars().take(OP_COLUMN_MAX - 3).collect();
        s.push_str("...");
        s
    } else {
        plain
    };

    let color = color_for_operation(&e.operation);
    match visible.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(visible.as_str()).to_string(),
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool, limit: Option<usize>) -> AppResult<()> {
        let entries = load_entries(&pool.conn, limit)?;

        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(String, String, String, &str)> = entries
            .iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone());
                (e.id.to_string(), date, op_cell(e), e.message.as_str())
            })
            .collect();

        let id_w = rows.iter().map(|r| r.0.len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.1.len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| visible_width(&r.2))
            .max()
            .unwrap_or(10);

        header("Internal log");

        for (id, date, op, message) in &rows {
            // padding calcolato sulle dimensioni reali SENZA ANSI
            let padding = " ".repeat(op_w.saturating_sub(visible_width(op)));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                id,
                date,
                op,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
