pub mod memory;
pub mod trello;

pub use memory::MemoryTracker;
pub use trello::{TrelloClient, TrelloCredentials};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomField {
    pub id: String,
    pub name: String,
}

/// Per-board configuration resolved from the tracking service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardInfo {
    pub board_id: String,
    pub assignee_field: CustomField,
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("tracker api request failed: {0}")]
    ApiRequest(String),
    #[error("tracker api responded with status {status}: {body}")]
    ApiResponse { status: u16, body: String },
    #[error("board `{board_id}` has no custom field named `{field}`")]
    MissingAssigneeField { board_id: String, field: String },
    #[error("card `{card_id}` not found on board `{board_id}`")]
    UnknownCard { board_id: String, card_id: String },
}

/// Card operations the commands need from a project-tracking service.
pub trait CardTracker: Send + Sync {
    fn list_cards(&self, board_id: &str) -> Result<Vec<Card>, TrackerError>;

    /// Cards whose name contains `partial`, ignoring case.
    fn find_cards(&self, board_id: &str, partial: &str) -> Result<Vec<Card>, TrackerError> {
        let needle = partial.to_lowercase();
        Ok(self
            .list_cards(board_id)?
            .into_iter()
            .filter(|card| card.name.to_lowercase().contains(&needle))
            .collect())
    }

    fn set_assignee(&self, board_id: &str, card_id: &str, assignee: &str)
        -> Result<(), TrackerError>;

    fn board_info(&self, board_id: &str) -> Result<BoardInfo, TrackerError>;
}

pub const TRACKER_INTEGRATION: &str = "tracker";

/// Trackers available to commands, keyed by integration name.
#[derive(Clone, Default)]
pub struct Integrations {
    trackers: BTreeMap<String, Arc<dyn CardTracker>>,
}

impl Integrations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tracker(mut self, name: &str, tracker: Arc<dyn CardTracker>) -> Self {
        self.register(name, tracker);
        self
    }

    pub fn register(&mut self, name: &str, tracker: Arc<dyn CardTracker>) {
        self.trackers.insert(name.to_string(), tracker);
    }

    pub fn tracker(&self, name: &str) -> Option<&dyn CardTracker> {
        self.trackers.get(name).map(|tracker| tracker.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.trackers.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for Integrations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integrations")
            .field("trackers", &self.names())
            .finish()
    }
}
