use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::queries::count_logs;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::colors::{CYAN, GREEN, RED, RESET};
use crate::utils::confirm::ask_confirmation;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        clear,
        all_users,
        yes,
    } = cmd
    {
        // DbPool::new already runs pending migrations
        let mut pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            run_pending_migrations(&pool.conn)?;
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        //
        // 2) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 3) CLEAR
        //
        if *clear {
            let user = if *all_users {
                None
            } else {
                Some(cfg.default_user.as_str())
            };

            let n = count_logs(&pool.conn, user)?;
            let who = user.map(|u| format!("user '{}'", u)).unwrap_or("ALL users".into());
            let prompt = format!(
                "Delete {} daily logs of {}? This action is irreversible.",
                n, who
            );

            if !*yes && !ask_confirmation(&prompt)? {
                info("Operation cancelled.");
            } else {
                let removed = DeleteLogic::clear(&mut pool, user)?;
                success(format!("Removed {} daily logs of {}.", removed, who));
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);

            pool.conn.execute_batch("VACUUM;")?;

            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
