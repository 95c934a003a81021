use super::ConfigError;
use crate::integrations::TrelloCredentials;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const TRELLO_KEY: &str = "TRELLO_KEY";
pub const TRELLO_TOKEN: &str = "TRELLO_TOKEN";

/// Secret values from a JSON object file, falling back to the environment.
/// File values win over environment values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    values: BTreeMap<String, String>,
}

impl Secrets {
    pub fn from_values(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let values = serde_json::from_str(&raw).map_err(|source| ConfigError::Secrets {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
            .or_else(|| std::env::var(key).ok().filter(|v| !v.trim().is_empty()))
    }

    pub fn require(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingSecret(key.to_string()))
    }

    pub fn trello_credentials(&self) -> Result<TrelloCredentials, ConfigError> {
        Ok(TrelloCredentials {
            key: self.require(TRELLO_KEY)?,
            token: self.require(TRELLO_TOKEN)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_empty() {
        let temp = tempdir().expect("tempdir");
        let secrets = Secrets::load(&temp.path().join("secrets.json")).expect("load");
        assert_eq!(secrets, Secrets::default());
    }

    #[test]
    fn file_values_are_returned() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("secrets.json");
        fs::write(
            &path,
            r#"{"BOARDBOT_TEST_SECRET_A": "from-file", "BOARDBOT_TEST_SECRET_B": "  "}"#,
        )
        .expect("write");
        let secrets = Secrets::load(&path).expect("load");
        assert_eq!(
            secrets.get("BOARDBOT_TEST_SECRET_A").as_deref(),
            Some("from-file")
        );
        assert!(secrets.require("BOARDBOT_TEST_SECRET_B").is_err());
    }

    #[test]
    fn malformed_file_is_reported() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("secrets.json");
        fs::write(&path, "not json").expect("write");
        assert!(matches!(
            Secrets::load(&path),
            Err(ConfigError::Secrets { .. })
        ));
    }

    #[test]
    fn trello_credentials_need_key_and_token() {
        let secrets = Secrets::from_values(BTreeMap::from([
            (TRELLO_KEY.to_string(), "k".to_string()),
            (TRELLO_TOKEN.to_string(), "t".to_string()),
        ]));
        let credentials = secrets.trello_credentials().expect("credentials");
        assert_eq!(credentials.key, "k");
        assert_eq!(credentials.token, "t");
    }
}
