use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        all_users,
        force,
    } = cmd
    {
        let user = (!*all_users).then_some(cfg.default_user.as_str());
        let mut pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(
            &mut pool,
            &cfg.habits,
            *format,
            file,
            range.as_deref(),
            user,
            *force,
        )?;
    }
    Ok(())
}
