use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::{AddLogic, parse_assignments};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date;

/// Log habits for a day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date: date_str,
        values,
    } = cmd
    {
        //
        // 1. Parse date (mandatory)
        //
        let d = date::parse_date(date_str)
            .ok_or_else(|| AppError::InvalidDate(date_str.to_string()))?;

        //
        // 2. Parse key=value pairs
        //
        let assignments = parse_assignments(values)?;

        //
        // 3. Open DB and upsert
        //
        let mut pool = DbPool::new(&cfg.database)?;
        AddLogic::apply(&mut pool, &cfg.habits, &cfg.default_user, d, &assignments)?;
    }

    Ok(())
}
