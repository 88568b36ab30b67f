use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print, last } = cmd {
        if !*print && last.is_none() {
            info("Nothing to do: use --print or --last N.");
            return Ok(());
        }

        let mut pool = DbPool::new(&cfg.database)?;
        LogLogic::print_log(&mut pool, *last)?;
    }

    Ok(())
}
