use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::month::{MonthLogic, MonthOutput};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Month { month, field, json } = cmd {
        let (year, m) = match month {
            Some(s) => date::parse_month(s).ok_or_else(|| AppError::InvalidPeriod(s.clone()))?,
            None => date::current_month(),
        };

        let mut pool = DbPool::new(&cfg.database)?;
        let series = MonthLogic::build(
            &mut pool,
            &cfg.habits,
            &cfg.default_user,
            year,
            m,
            field.as_deref(),
        )?;

        let output = if *json {
            MonthOutput::Json
        } else {
            MonthOutput::Table
        };
        MonthLogic::print(&series, &cfg.habits, output, cfg.separator())?;
    }

    Ok(())
}
