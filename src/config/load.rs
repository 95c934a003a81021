use super::{default_global_config_path, ConfigError, Secrets, Settings};
use std::path::Path;

/// Loads and validates settings from `path`, or the global config file.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let settings = match path {
        Some(path) => Settings::from_path(path)?,
        None => Settings::from_path(&default_global_config_path()?)?,
    };
    settings.validate()?;
    Ok(settings)
}

pub fn load_secrets(settings: &Settings) -> Result<Secrets, ConfigError> {
    Secrets::load(&settings.resolved_secrets_path()?)
}
