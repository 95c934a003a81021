use crate::commands::default_registry;
use crate::config::{
    load_secrets, load_settings as config_load_settings, ConfigError, Settings, TrackerKind,
};
use crate::dispatch::{DispatchError, DispatchOutcome, Dispatcher};
use crate::integrations::{
    CardTracker, Integrations, MemoryTracker, TrelloClient, TRACKER_INTEGRATION,
};
use crate::shared::EventLog;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub const EXIT_OK: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_ARGUMENTS: i32 = 2;
pub const EXIT_UNKNOWN_COMMAND: i32 = 3;
pub const EXIT_REJECTED: i32 = 4;
pub const EXIT_COMMAND_FAILED: i32 = 5;

/// A CLI failure: the text to print on stderr and the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliFailure {
    pub exit_code: i32,
    pub message: String,
}

impl CliFailure {
    pub fn new(exit_code: i32, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(EXIT_USAGE, message)
    }
}

impl fmt::Display for CliFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<ConfigError> for CliFailure {
    fn from(err: ConfigError) -> Self {
        Self::usage(err.to_string())
    }
}

pub fn load_settings(config_path: Option<&Path>) -> Result<Settings, CliFailure> {
    Ok(config_load_settings(config_path)?)
}

/// Wires the configured tracker, board routing and event log into a dispatcher.
pub fn build_dispatcher(settings: &Settings) -> Result<Dispatcher, ConfigError> {
    let log = EventLog::to_file(settings.resolved_log_path()?);
    let tracker: Arc<dyn CardTracker> = match settings.tracker.kind {
        TrackerKind::Memory => Arc::new(MemoryTracker::new(settings.tracker.cards.clone())),
        TrackerKind::Trello => {
            let credentials = load_secrets(settings)?.trello_credentials()?;
            let mut client = TrelloClient::new(credentials, settings.tracker.assignee_field.clone())
                .with_log(log.clone());
            if let Some(api_base) = &settings.tracker.api_base {
                client = client.with_api_base(api_base.clone());
            }
            Arc::new(client)
        }
    };

    Ok(Dispatcher::new(
        default_registry(),
        Integrations::new().with_tracker(TRACKER_INTEGRATION, tracker),
    )
    .with_marker(settings.command_marker)
    .with_boards(settings.board_routing())
    .with_log(log))
}

pub fn exit_code_for(result: &Result<DispatchOutcome, DispatchError>) -> i32 {
    match result {
        Ok(DispatchOutcome::Ignored) | Ok(DispatchOutcome::Completed { .. }) => EXIT_OK,
        Ok(DispatchOutcome::UnknownCommand(_)) => EXIT_UNKNOWN_COMMAND,
        Ok(DispatchOutcome::Rejected { .. }) => EXIT_REJECTED,
        Err(DispatchError::Arguments { .. }) => EXIT_ARGUMENTS,
        Err(DispatchError::Command { .. }) | Err(DispatchError::Reply(_)) => EXIT_COMMAND_FAILED,
    }
}
