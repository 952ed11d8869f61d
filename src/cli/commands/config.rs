use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use std::env;
use std::path::Path;
use std::process::Command;

fn platform_editor() -> String {
    env::var("EDITOR")
        .or_else(|_| env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn open_in(editor: &str, path: &Path) -> bool {
    Command::new(editor)
        .arg(path)
        .status()
        .is_ok_and(|s| s.success())
}

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = cmd
    {
        let path = Config::config_file();

        if *print_config {
            println!("📄 Current configuration ({}):\n", path.display());
            println!("{}", cfg.to_yaml()?);
        }

        if *edit_config {
            if !path.exists() {
                info("No configuration file yet. Run `rdashboard init` first.");
                return Ok(());
            }

            let fallback = platform_editor();
            let mut candidates = vec![editor.clone().unwrap_or_else(|| fallback.clone())];
            if candidates[0] != fallback {
                candidates.push(fallback);
            }

            match candidates.iter().find(|e| open_in(e, &path)) {
                Some(used) => success(format!("Configuration file edited with '{}'", used)),
                None => warning(format!(
                    "Could not open {} with: {}",
                    path.display(),
                    candidates.join(", ")
                )),
            }
        }
    }

    Ok(())
}
