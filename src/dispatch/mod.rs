mod context;
mod registry;

pub use context::CommandContext;
pub use registry::{CommandDef, CommandOutcome, CommandRegistry, CommandRun, Rejection};

use crate::arguments::ArgumentError;
use crate::chat::{ChatMessage, ReplyError, ReplySink};
use crate::integrations::{Integrations, TrackerError};
use crate::shared::EventLog;
use std::collections::BTreeMap;

pub const DEFAULT_COMMAND_MARKER: char = '!';

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Reply(#[from] ReplyError),
    #[error("integration `{0}` is not configured")]
    MissingIntegration(String),
    #[error("no board configured for command `{command}`")]
    MissingBoard { command: String },
    #[error("argument `{0}` is missing or has the wrong shape")]
    InvalidArgument(String),
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("invalid arguments for command `{command}`: {source}")]
    Arguments {
        command: String,
        #[source]
        source: ArgumentError,
    },
    #[error("command `{command}` failed: {source}")]
    Command {
        command: String,
        #[source]
        source: CommandError,
    },
    #[error(transparent)]
    Reply(#[from] ReplyError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Not a command line; nothing was sent.
    Ignored,
    UnknownCommand(String),
    Completed { command: String },
    Rejected { command: String, rejection: Rejection },
}

/// Which board each command works on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardRouting {
    pub default_board: Option<String>,
    pub per_command: BTreeMap<String, String>,
}

impl BoardRouting {
    pub fn single(board_id: impl Into<String>) -> Self {
        Self {
            default_board: Some(board_id.into()),
            per_command: BTreeMap::new(),
        }
    }

    pub fn board_for(&self, command_name: &str) -> Option<&str> {
        self.per_command
            .get(command_name)
            .or(self.default_board.as_ref())
            .map(String::as_str)
    }
}

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Splits `<marker><name> <remainder>`; anything else is not a command.
/// A remainder spanning more than one line is not a command.
pub fn parse_command_line(content: &str, marker: char) -> Option<(&str, &str)> {
    let rest = content.strip_prefix(marker)?;
    let (name, remainder) = rest.split_once(' ')?;
    if name.is_empty() || remainder.contains(LINE_TERMINATORS) {
        return None;
    }
    Some((name, remainder))
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: CommandRegistry,
    integrations: Integrations,
    boards: BoardRouting,
    marker: char,
    log: EventLog,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, integrations: Integrations) -> Self {
        Self {
            registry,
            integrations,
            boards: BoardRouting::default(),
            marker: DEFAULT_COMMAND_MARKER,
            log: EventLog::disabled(),
        }
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_boards(mut self, boards: BoardRouting) -> Self {
        self.boards = boards;
        self
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn marker(&self) -> char {
        self.marker
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn on_message(
        &self,
        message: &ChatMessage,
        channel: &dyn ReplySink,
    ) -> Result<DispatchOutcome, DispatchError> {
        let Some((name, remainder)) = parse_command_line(&message.content, self.marker) else {
            return Ok(DispatchOutcome::Ignored);
        };

        let Some(command) = self.registry.find(name) else {
            self.log.warn(
                "dispatch.unknown_command",
                &format!("`{name}` from {}", message.author.name),
            );
            channel.send_message(&format!("Command `{name}` not found"))?;
            return Ok(DispatchOutcome::UnknownCommand(name.to_string()));
        };

        self.log.info(
            "dispatch.command",
            &format!("`{name}` from {}: {remainder}", message.author.name),
        );

        let args = match command.parser().parse(remainder, message) {
            Ok(args) => args,
            Err(source) => {
                self.log
                    .warn("dispatch.arguments_invalid", &format!("`{name}`: {source}"));
                channel.send_message(&source.to_string())?;
                return Err(DispatchError::Arguments {
                    command: name.to_string(),
                    source,
                });
            }
        };

        let context = CommandContext::new(
            command.command_name,
            message,
            channel,
            &self.integrations,
            self.boards.board_for(command.command_name),
        );
        match (command.run)(&context, &args) {
            Ok(CommandOutcome::Completed) => Ok(DispatchOutcome::Completed {
                command: name.to_string(),
            }),
            Ok(CommandOutcome::Rejected(rejection)) => {
                self.log.info(
                    "dispatch.rejected",
                    &format!("`{name}`: {}", rejection.as_str()),
                );
                Ok(DispatchOutcome::Rejected {
                    command: name.to_string(),
                    rejection,
                })
            }
            Err(source) => {
                self.log
                    .error("dispatch.command_failed", &format!("`{name}`: {source}"));
                let reply = format!("Command `{name}` failed: {source}");
                if let Err(err) = channel.send_message(&reply) {
                    self.log.error("dispatch.reply_failed", &err.to_string());
                }
                Err(DispatchError::Command {
                    command: name.to_string(),
                    source,
                })
            }
        }
    }
}
