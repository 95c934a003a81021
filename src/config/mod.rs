pub mod error;
pub mod load;
pub mod paths;
pub mod secrets;
pub mod settings;

pub use error::ConfigError;
pub use load::{load_secrets, load_settings};
pub use paths::{
    default_global_config_path, default_log_path, default_secrets_path, GLOBAL_SECRETS_FILE_NAME,
    GLOBAL_SETTINGS_FILE_NAME, GLOBAL_STATE_DIR,
};
pub use secrets::{Secrets, TRELLO_KEY, TRELLO_TOKEN};
pub use settings::{LocalChannelConfig, Settings, TrackerConfig, TrackerKind};
