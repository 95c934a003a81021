#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid secrets json in {path}: {source}")]
    Secrets {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("settings validation failed: {0}")]
    Settings(String),
    #[error("missing required secret `{0}` (set it in the secrets file or the environment)")]
    MissingSecret(String),
    #[error("failed to resolve home directory for global config path")]
    HomeDirectoryUnavailable,
}
