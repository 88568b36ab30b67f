use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_range;
use crate::utils::date;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        all_users,
        last,
    } = cmd
    {
        // --last guarda tutto lo storico
        let bounds = match last {
            Some(_) => None,
            None => resolve_period(period.as_deref())?,
        };
        let user = (!*all_users).then_some(cfg.default_user.as_str());

        let mut pool = DbPool::new(&cfg.database)?;
        ListLogic::print(&mut pool, &cfg.habits, user, bounds, *last, cfg.separator())?;
    }
    Ok(())
}

/// `None` means no date filter (`--period all`).
fn resolve_period(period: Option<&str>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match period {
        Some(p) if p.eq_ignore_ascii_case("all") => Ok(None),
        Some(p) => parse_range(p).map(Some),
        None => {
            let (y, m) = date::current_month();
            date::month_bounds(y, m)
                .map(Some)
                .ok_or_else(|| AppError::InvalidPeriod(format!("{y}-{m}")))
        }
    }
}
