pub mod api;

use super::{BoardInfo, Card, CardTracker, CustomField, TrackerError};
use crate::shared::EventLog;
use api::{
    check_response, endpoint, find_field, CustomFieldUpdate, TrelloCard,
    DEFAULT_TRELLO_API_BASE,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Mutex;
use urlencoding::encode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrelloCredentials {
    pub key: String,
    pub token: String,
}

/// Trello REST client.
///
/// Board configuration (which custom field holds the assignee) is looked up on
/// first use of a board and kept for the lifetime of the client. Two threads
/// missing the cache for the same board at once will both fetch it; the
/// result is the same either way.
#[derive(Debug)]
pub struct TrelloClient {
    api_base: String,
    credentials: TrelloCredentials,
    assignee_field: String,
    boards: Mutex<BTreeMap<String, BoardInfo>>,
    log: EventLog,
}

impl TrelloClient {
    pub fn new(credentials: TrelloCredentials, assignee_field: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_TRELLO_API_BASE.to_string(),
            credentials,
            assignee_field: assignee_field.into(),
            boards: Mutex::new(BTreeMap::new()),
            log: EventLog::disabled(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn cached_boards(&self) -> Vec<String> {
        self.boards
            .lock()
            .map(|boards| boards.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn auth_query(&self, mut query: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        query.push(("key", self.credentials.key.clone()));
        query.push(("token", self.credentials.token.clone()));
        query
    }

    fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: Vec<(&'static str, String)>,
    ) -> Result<T, TrackerError> {
        let url = endpoint(&self.api_base, path, &self.auth_query(query));
        check_response(ureq::get(&url).call())?
            .into_json::<T>()
            .map_err(|e| TrackerError::ApiRequest(e.to_string()))
    }

    fn load_board(&self, board_id: &str) -> Result<BoardInfo, TrackerError> {
        self.log
            .info("trello.board.load", &format!("loading board `{board_id}`"));
        let fields: Vec<CustomField> = self.get_json(
            &format!("boards/{}/customFields", encode(board_id)),
            vec![("fields", "name".to_string())],
        )?;
        let Some(field) = find_field(&fields, &self.assignee_field) else {
            let known = fields
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            self.log.error(
                "trello.board.missing_field",
                &format!(
                    "board `{board_id}` has no `{}` field (fields: {known})",
                    self.assignee_field
                ),
            );
            return Err(TrackerError::MissingAssigneeField {
                board_id: board_id.to_string(),
                field: self.assignee_field.clone(),
            });
        };
        Ok(BoardInfo {
            board_id: board_id.to_string(),
            assignee_field: field.clone(),
        })
    }
}

impl CardTracker for TrelloClient {
    fn list_cards(&self, board_id: &str) -> Result<Vec<Card>, TrackerError> {
        let board = self.board_info(board_id)?;
        let cards: Vec<TrelloCard> = self.get_json(
            &format!("boards/{}/cards", encode(board_id)),
            vec![
                ("fields", "name".to_string()),
                ("customFieldItems", "true".to_string()),
            ],
        )?;
        Ok(cards
            .into_iter()
            .map(|card| card.into_card(&board.assignee_field.id))
            .collect())
    }

    fn set_assignee(
        &self,
        board_id: &str,
        card_id: &str,
        assignee: &str,
    ) -> Result<(), TrackerError> {
        let board = self.board_info(board_id)?;
        let url = endpoint(
            &self.api_base,
            &format!(
                "card/{}/customField/{}/item",
                encode(card_id),
                encode(&board.assignee_field.id)
            ),
            &self.auth_query(Vec::new()),
        );
        let body = serde_json::to_value(CustomFieldUpdate::text(assignee))
            .map_err(|e| TrackerError::ApiRequest(e.to_string()))?;
        check_response(ureq::put(&url).send_json(body))?;
        Ok(())
    }

    fn board_info(&self, board_id: &str) -> Result<BoardInfo, TrackerError> {
        let cached = self
            .boards
            .lock()
            .ok()
            .and_then(|boards| boards.get(board_id).cloned());
        if let Some(info) = cached {
            return Ok(info);
        }

        let info = self.load_board(board_id)?;
        if let Ok(mut boards) = self.boards.lock() {
            boards.insert(board_id.to_string(), info.clone());
        }
        Ok(info)
    }
}
