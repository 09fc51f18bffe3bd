pub mod availability;
pub mod config;
pub mod generate;
pub mod settings;
pub mod subject;

use std::path::{Path, PathBuf};

use studyplan_core::{Config, SettingsDocument};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// `--file` if given, otherwise the configured settings file.
pub fn settings_path(file: Option<PathBuf>) -> PathBuf {
    file.unwrap_or_else(|| PathBuf::from(Config::load_or_default().settings_file))
}

/// Load the document at `path`, or start a fresh one if the file is missing.
///
/// A file that exists but cannot be parsed is an error; it is never replaced.
pub fn load_or_new(path: &Path) -> Result<SettingsDocument, Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(SettingsDocument::load(path)?)
    } else {
        tracing::info!(path = %path.display(), "settings document not found, starting a new one");
        Ok(Config::load_or_default().new_document())
    }
}

pub fn save(doc: &SettingsDocument, path: &Path) -> CommandResult {
    doc.save(path)?;
    tracing::debug!(path = %path.display(), "settings document saved");
    Ok(())
}
