use crate::config::ConfigError;
use std::path::PathBuf;

pub const GLOBAL_STATE_DIR: &str = ".boardbot";
pub const GLOBAL_SETTINGS_FILE_NAME: &str = "config.yaml";
pub const GLOBAL_SECRETS_FILE_NAME: &str = "secrets.json";
pub const GLOBAL_LOG_FILE: &str = "logs/boardbot.log";

fn state_dir() -> Result<PathBuf, ConfigError> {
    let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
    Ok(PathBuf::from(home).join(GLOBAL_STATE_DIR))
}

pub fn default_global_config_path() -> Result<PathBuf, ConfigError> {
    Ok(state_dir()?.join(GLOBAL_SETTINGS_FILE_NAME))
}

pub fn default_secrets_path() -> Result<PathBuf, ConfigError> {
    Ok(state_dir()?.join(GLOBAL_SECRETS_FILE_NAME))
}

pub fn default_log_path() -> Result<PathBuf, ConfigError> {
    Ok(state_dir()?.join(GLOBAL_LOG_FILE))
}
