use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::fs;
use std::path::Path;
use std::process::Command;

/// `$EDITOR`, then `$VISUAL`, then the platform default.
fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let path = Config::config_file();

    if *print_config {
        println!("📄 Current configuration ({}):\n", path.display());
        println!("{}", cfg.to_yaml()?);
    }

    if *edit_config {
        // Start from the effective settings when no file was written yet.
        if !path.exists() {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(&path, cfg.to_yaml()?)?;
            info(format!("Created {}", path.display()));
        }

        let fallback = default_editor();
        let chosen = editor.clone().unwrap_or_else(|| fallback.clone());

        let edited = if run_editor(&chosen, &path) {
            true
        } else if chosen != fallback {
            warning(format!(
                "Editor '{chosen}' not available, falling back to '{fallback}'"
            ));
            run_editor(&fallback, &path)
        } else {
            false
        };

        if !edited {
            return Err(AppError::Config(format!(
                "could not open {} with an editor",
                path.display()
            )));
        }

        let reloaded = Config::load_from(&path)?;
        success(format!(
            "Configuration saved (headcount mode: {}).",
            reloaded.threshold_headcount.as_str()
        ));
    }

    Ok(())
}
