use super::{default_log_path, default_secrets_path, ConfigError};
use crate::chat::Participant;
use crate::dispatch::{BoardRouting, DEFAULT_COMMAND_MARKER};
use crate::integrations::Card;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ASSIGNEE_FIELD: &str = "assignee";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrackerKind {
    #[default]
    Trello,
    Memory,
}

impl TrackerKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trello => "trello",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub kind: TrackerKind,
    #[serde(default = "default_assignee_field")]
    pub assignee_field: String,
    #[serde(default)]
    pub api_base: Option<String>,
    /// Seed cards for the `memory` tracker.
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            kind: TrackerKind::default(),
            assignee_field: default_assignee_field(),
            api_base: None,
            cards: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LocalChannelConfig {
    #[serde(default)]
    pub author_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_command_marker")]
    pub command_marker: char,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    #[serde(default)]
    pub secrets_path: Option<PathBuf>,
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub default_board: Option<String>,
    /// Board id per command name, overriding `default_board`.
    #[serde(default)]
    pub boards: BTreeMap<String, String>,
    /// Display name per participant id.
    #[serde(default)]
    pub participants: BTreeMap<String, String>,
    #[serde(default)]
    pub local: LocalChannelConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            command_marker: default_command_marker(),
            log_path: None,
            secrets_path: None,
            tracker: TrackerConfig::default(),
            default_board: None,
            boards: BTreeMap::new(),
            participants: BTreeMap::new(),
            local: LocalChannelConfig::default(),
        }
    }
}

fn default_command_marker() -> char {
    DEFAULT_COMMAND_MARKER
}

fn default_assignee_field() -> String {
    DEFAULT_ASSIGNEE_FIELD.to_string()
}

fn is_mentionable_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|ch| ch.is_alphanumeric() || ch == '_')
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command_marker.is_whitespace() {
            return Err(ConfigError::Settings(
                "command_marker must not be whitespace".to_string(),
            ));
        }
        if self.tracker.assignee_field.trim().is_empty() {
            return Err(ConfigError::Settings(
                "tracker.assignee_field must be non-empty".to_string(),
            ));
        }
        if let Some(board) = &self.default_board {
            if board.trim().is_empty() {
                return Err(ConfigError::Settings(
                    "default_board must be non-empty when set".to_string(),
                ));
            }
        }
        for (command, board) in &self.boards {
            if board.trim().is_empty() {
                return Err(ConfigError::Settings(format!(
                    "boards.{command} must be a non-empty board id"
                )));
            }
        }
        for id in self.participants.keys() {
            if !is_mentionable_id(id) {
                return Err(ConfigError::Settings(format!(
                    "participant id `{id}` must contain only letters, digits, or `_`"
                )));
            }
        }
        if let Some(author_id) = &self.local.author_id {
            if !self.participants.contains_key(author_id) {
                return Err(ConfigError::Settings(format!(
                    "local.author_id `{author_id}` is not listed in participants"
                )));
            }
        }
        let mut card_ids = BTreeSet::new();
        for card in &self.tracker.cards {
            if !card_ids.insert(card.id.as_str()) {
                return Err(ConfigError::Settings(format!(
                    "tracker.cards contains duplicate card id `{}`",
                    card.id
                )));
            }
        }
        Ok(())
    }

    pub fn board_routing(&self) -> BoardRouting {
        BoardRouting {
            default_board: self.default_board.clone(),
            per_command: self.boards.clone(),
        }
    }

    pub fn participant(&self, id: &str) -> Option<Participant> {
        self.participants
            .get(id)
            .map(|name| Participant::new(id, name.as_str()))
    }

    pub fn local_author(&self) -> Result<Participant, ConfigError> {
        let author_id = self.local.author_id.as_deref().ok_or_else(|| {
            ConfigError::Settings("local.author_id is required for local chat".to_string())
        })?;
        self.participant(author_id).ok_or_else(|| {
            ConfigError::Settings(format!(
                "local.author_id `{author_id}` is not listed in participants"
            ))
        })
    }

    pub fn resolved_log_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_path {
            Some(path) => Ok(path.clone()),
            None => default_log_path(),
        }
    }

    pub fn resolved_secrets_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.secrets_path {
            Some(path) => Ok(path.clone()),
            None => default_secrets_path(),
        }
    }
}
