//! Settings document commands for CLI.

use std::path::PathBuf;

use clap::Subcommand;
use studyplan_core::{Config, SettingsDocument};

use super::{load_or_new, save, settings_path, CommandResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the whole settings document
    Show,
    /// Get a session rule (e.g. "break_minutes", "pomodoro_mode")
    Get {
        /// Settings key
        key: String,
    },
    /// Set a session rule
    Set {
        /// Settings key
        key: String,
        /// New value
        value: String,
    },
    /// Check the document without generating
    Validate,
}

/// Write a new document seeded from the config defaults.
pub fn init(file: Option<PathBuf>, force: bool) -> CommandResult {
    let path = settings_path(file);
    if path.exists() && !force {
        return Err(format!("{} already exists (use --force to overwrite)", path.display()).into());
    }
    let doc = Config::load_or_default().new_document();
    save(&doc, &path)?;
    println!("Settings written to {}", path.display());
    Ok(())
}

pub fn run(file: Option<PathBuf>, action: SettingsAction) -> CommandResult {
    let path = settings_path(file);

    match action {
        SettingsAction::Show => {
            let doc = load_or_new(&path)?;
            println!("{}", doc.to_json_string()?);
        }
        SettingsAction::Get { key } => {
            let doc = load_or_new(&path)?;
            match doc.get_setting(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown key: {key}").into()),
            }
        }
        SettingsAction::Set { key, value } => {
            let mut doc = load_or_new(&path)?;
            doc.set_setting(&key, &value)?;
            save(&doc, &path)?;
            println!("ok");
        }
        SettingsAction::Validate => {
            let doc = SettingsDocument::load(&path)?;
            doc.validate()?;
            println!(
                "{} is valid: {} subjects, {} minutes available",
                path.display(),
                doc.subjects.len(),
                doc.available_time.total_minutes()
            );
        }
    }
    Ok(())
}
