use crate::chat::{mentioned_ids, ChatMessage, Participant, RecordingSink};
use crate::config::Settings;
use crate::dispatch::{DispatchError, DispatchOutcome, Dispatcher};

pub const CHAT_EXIT_COMMANDS: &[&str] = &["/exit", "exit", "quit"];

/// One author typing into a terminal against a configured dispatcher.
#[derive(Debug)]
pub struct LocalChatSession<'a> {
    pub settings: &'a Settings,
    pub dispatcher: &'a Dispatcher,
    pub author: Participant,
}

/// What a single line produced: the replies the bot sent plus the dispatch result.
#[derive(Debug)]
pub struct LocalExchange {
    pub replies: Vec<String>,
    pub result: Result<DispatchOutcome, DispatchError>,
}

impl<'a> LocalChatSession<'a> {
    pub fn new(settings: &'a Settings, dispatcher: &'a Dispatcher, author: Participant) -> Self {
        Self {
            settings,
            dispatcher,
            author,
        }
    }

    pub fn exchange(&self, line: &str) -> LocalExchange {
        let message = build_message(self.settings, self.author.clone(), line);
        let sink = RecordingSink::new();
        let result = self.dispatcher.on_message(&message, &sink);
        LocalExchange {
            replies: sink.messages(),
            result,
        }
    }
}

/// Builds a chat message, resolving every mention marker against the configured participants.
///
/// Markers for unknown ids are left unresolved so the parser reports them.
pub fn build_message(settings: &Settings, author: Participant, content: &str) -> ChatMessage {
    mentioned_ids(content)
        .into_iter()
        .filter_map(|id| settings.participant(id))
        .fold(ChatMessage::new(content, author), ChatMessage::with_mention)
}

pub fn is_chat_exit_command(message: &str) -> bool {
    CHAT_EXIT_COMMANDS
        .iter()
        .any(|command| message.eq_ignore_ascii_case(command))
}
