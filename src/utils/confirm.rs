use crate::errors::AppResult;
use crate::ui::messages::warning;
use std::io::{self, Write};

/// Ask a yes/no confirmation from the user. Anything but `y`/`yes` is a no.
pub fn ask_confirmation(prompt: &str) -> AppResult<bool> {
    warning(prompt);
    print!("Confirm [y/N]: ");
    io::stdout().flush().ok();

    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(matches!(s.trim().to_lowercase().as_str(), "y" | "yes"))
}
