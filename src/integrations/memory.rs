use super::{BoardInfo, Card, CardTracker, CustomField, TrackerError};
use std::sync::Mutex;

pub const MEMORY_ASSIGNEE_FIELD_ID: &str = "assignee";

/// Tracker backed by a card list in memory; every board id sees the same cards.
#[derive(Debug, Default)]
pub struct MemoryTracker {
    cards: Mutex<Vec<Card>>,
}

impl MemoryTracker {
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards: Mutex::new(cards),
        }
    }

    pub fn cards(&self) -> Vec<Card> {
        self.cards
            .lock()
            .map(|cards| cards.clone())
            .unwrap_or_default()
    }

    pub fn card_named(&self, name: &str) -> Option<Card> {
        self.cards().into_iter().find(|card| card.name == name)
    }
}

impl CardTracker for MemoryTracker {
    fn list_cards(&self, _board_id: &str) -> Result<Vec<Card>, TrackerError> {
        Ok(self.cards())
    }

    fn set_assignee(
        &self,
        board_id: &str,
        card_id: &str,
        assignee: &str,
    ) -> Result<(), TrackerError> {
        let mut cards = self
            .cards
            .lock()
            .map_err(|_| TrackerError::ApiRequest("memory tracker poisoned".to_string()))?;
        let card = cards
            .iter_mut()
            .find(|card| card.id == card_id)
            .ok_or_else(|| TrackerError::UnknownCard {
                board_id: board_id.to_string(),
                card_id: card_id.to_string(),
            })?;
        card.assignee = Some(assignee.to_string());
        Ok(())
    }

    fn board_info(&self, board_id: &str) -> Result<BoardInfo, TrackerError> {
        Ok(BoardInfo {
            board_id: board_id.to_string(),
            assignee_field: CustomField {
                id: MEMORY_ASSIGNEE_FIELD_ID.to_string(),
                name: MEMORY_ASSIGNEE_FIELD_ID.to_string(),
            },
        })
    }
}
