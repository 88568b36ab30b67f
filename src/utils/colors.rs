/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const CYAN: &str = "\x1b[36m";

/// Returns a grey placeholder for absent values and the text itself otherwise.
///
/// Esempio:
/// `colorize_optional(None)` → "<grey>--<reset>"
pub fn colorize_optional(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => format!("{GREY}--{RESET}"),
    }
}

/// Flags are green when done, red when explicitly not done.
pub fn colorize_flag(done: bool) -> String {
    if done {
        format!("{GREEN}yes{RESET}")
    } else {
        format!("{RED}no{RESET}")
    }
}
