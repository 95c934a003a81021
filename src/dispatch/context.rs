use super::CommandError;
use crate::chat::{ChatMessage, Participant, ReplyError, ReplySink};
use crate::integrations::{CardTracker, Integrations};

/// Everything a command handler may touch while handling one message.
pub struct CommandContext<'a> {
    pub(crate) command_name: &'a str,
    pub(crate) message: &'a ChatMessage,
    pub(crate) channel: &'a dyn ReplySink,
    pub(crate) integrations: &'a Integrations,
    pub(crate) board_id: Option<&'a str>,
}

impl<'a> CommandContext<'a> {
    pub fn new(
        command_name: &'a str,
        message: &'a ChatMessage,
        channel: &'a dyn ReplySink,
        integrations: &'a Integrations,
        board_id: Option<&'a str>,
    ) -> Self {
        Self {
            command_name,
            message,
            channel,
            integrations,
            board_id,
        }
    }

    pub fn send_message(&self, text: &str) -> Result<(), ReplyError> {
        self.channel.send_message(text)
    }

    pub fn react(&self, emoji: &str) -> Result<(), ReplyError> {
        self.channel.react(emoji)
    }

    pub fn can_react(&self) -> bool {
        self.channel.can_react()
    }

    pub fn author(&self) -> &Participant {
        &self.message.author
    }

    pub fn integration(&self, name: &str) -> Option<&dyn CardTracker> {
        self.integrations.tracker(name)
    }

    pub fn tracker(&self, name: &str) -> Result<&dyn CardTracker, CommandError> {
        self.integration(name)
            .ok_or_else(|| CommandError::MissingIntegration(name.to_string()))
    }

    /// Board this command works on, from the board routing configuration.
    pub fn board_id(&self) -> Result<&str, CommandError> {
        self.board_id.ok_or_else(|| CommandError::MissingBoard {
            command: self.command_name.to_string(),
        })
    }
}
