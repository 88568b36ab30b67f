use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, dry_run } = cmd {
        let path = expand_tilde(file);
        let mut pool = DbPool::new(&cfg.database)?;
        ImportLogic::apply(&mut pool, &path, &cfg.habits, &cfg.default_user, *dry_run)?;
    }

    Ok(())
}
