use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::confirm::ask_confirmation;
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del {
        date: date_str,
        yes,
    } = cmd
    {
        let d = date::parse_date(date_str).ok_or_else(|| AppError::InvalidDate(date_str.into()))?;
        let user = cfg.default_user.as_str();

        //
        // Confirmation prompt
        //
        let prompt = format!(
            "Delete the log of {} for {}? This action is irreversible.",
            user, d
        );

        if !*yes && !ask_confirmation(&prompt)? {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut pool = DbPool::new(&cfg.database)?;
        DeleteLogic::apply(&mut pool, user, d)?;
        success(format!("Log of {} for {} has been deleted.", user, d));
    }

    Ok(())
}
