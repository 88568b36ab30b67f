//! Formatting utilities used for CLI and export outputs.

/// Render a number without a trailing `.0` when it is integral.
///
/// `5.0` → "5", `2.50` → "2.5"
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        let s = format!("{:.2}", n);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
