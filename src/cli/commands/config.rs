use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, success, warning};
use crate::utils::table::Table;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        habits,
        edit_config,
        editor,
    } = cmd
    {
        // ---- PRINT CONFIG ----
        if *print_config {
            println!("📄 Current configuration ({}):\n", Config::config_file().display());
            println!("{}", serde_yaml::to_string(cfg)?);
        }

        // ---- HABITS ----
        if *habits {
            let mut table = Table::new(vec!["key", "kind", "label", "aliases"], cfg.separator());
            for h in &cfg.habits.habits {
                table.add_row(vec![
                    h.key.clone(),
                    h.kind.as_str().to_string(),
                    h.display_label().to_string(),
                    h.aliases.join(", "),
                ]);
            }
            println!("{}", table.render());
        }

        // ---- EDIT CONFIG ----
        if *edit_config {
            edit(editor.as_deref());
        }
    }

    Ok(())
}

fn edit(requested: Option<&str>) {
    let path = Config::config_file();

    // Default editor basato sulla piattaforma
    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor_to_use = requested.map(str::to_string).unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(&path).status() {
        Ok(s) if s.success() => {
            success(format!(
                "Configuration file edited successfully using '{}'",
                editor_to_use
            ));
        }
        _ => {
            warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            ));

            match Command::new(&default_editor).arg(&path).status() {
                Ok(s) if s.success() => success(format!(
                    "Configuration file edited successfully using fallback '{}'",
                    default_editor
                )),
                _ => error(format!(
                    "Failed to edit configuration file using fallback '{}'",
                    default_editor
                )),
            }
        }
    }
}
