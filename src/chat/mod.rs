use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

pub const MENTION_PREFIX: &str = "<@!";
pub const MENTION_SUFFIX: &str = ">";

/// A chat participant as seen by commands.
///
/// `name` is the identity handed to external services (the assignee text on a
/// card); `mention` is how the participant is written back into chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub mention: String,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        let mention = mention_marker(&id);
        Self {
            id,
            name: name.into(),
            mention,
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.mention)
    }
}

pub fn mention_marker(id: &str) -> String {
    format!("{MENTION_PREFIX}{id}{MENTION_SUFFIX}")
}

/// Ids of every mention marker in `content`, in order of first appearance.
pub fn mentioned_ids(content: &str) -> Vec<&str> {
    static MENTION: OnceLock<Regex> = OnceLock::new();
    let mention = MENTION.get_or_init(|| Regex::new(r"<@!(\w+)>").expect("valid mention regex"));
    let mut ids: Vec<&str> = Vec::new();
    for captures in mention.captures_iter(content) {
        if let Some(id) = captures.get(1).map(|m| m.as_str()) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Looks up participants referenced by mention markers in a message.
pub trait MentionResolver {
    fn resolve_mention(&self, id: &str) -> Option<Participant>;
}

impl MentionResolver for BTreeMap<String, Participant> {
    fn resolve_mention(&self, id: &str) -> Option<Participant> {
        self.get(id).cloned()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub content: String,
    pub author: Participant,
    pub mentions: BTreeMap<String, Participant>,
}

impl ChatMessage {
    pub fn new(content: impl Into<String>, author: Participant) -> Self {
        Self {
            content: content.into(),
            author,
            mentions: BTreeMap::new(),
        }
    }

    pub fn with_mention(mut self, participant: Participant) -> Self {
        self.mentions.insert(participant.id.clone(), participant);
        self
    }
}

impl MentionResolver for ChatMessage {
    fn resolve_mention(&self, id: &str) -> Option<Participant> {
        self.mentions.resolve_mention(id)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReplyError {
    #[error("failed to deliver reply: {0}")]
    Delivery(String),
    #[error("reactions are not supported by this channel")]
    ReactionsUnsupported,
}

/// Where replies to a message go: the channel the message came from.
pub trait ReplySink: Send + Sync {
    fn send_message(&self, text: &str) -> Result<(), ReplyError>;

    fn react(&self, _emoji: &str) -> Result<(), ReplyError> {
        Err(ReplyError::ReactionsUnsupported)
    }

    fn can_react(&self) -> bool {
        false
    }
}

/// Reply sink that keeps every message it is handed.
#[derive(Debug, Default)]
pub struct RecordingSink {
    sent: std::sync::Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.messages().pop()
    }
}

impl ReplySink for RecordingSink {
    fn send_message(&self, text: &str) -> Result<(), ReplyError> {
        self.sent
            .lock()
            .map_err(|_| ReplyError::Delivery("recording sink poisoned".to_string()))?
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn participant_renders_as_mention_marker() {
        let participant = Participant::new("42", "Jo#0042");
        assert_eq!(participant.to_string(), "<@!42>");
        assert_eq!(participant.name, "Jo#0042");
    }

    #[test]
    fn message_resolves_only_its_own_mentions() {
        let message = ChatMessage::new("!assign <@!7> to X", Participant::new("1", "Author"))
            .with_mention(Participant::new("7", "User 7"));
        assert_eq!(
            message.resolve_mention("7").map(|p| p.name),
            Some("User 7".to_string())
        );
        assert!(message.resolve_mention("1").is_none());
    }

    #[test]
    fn mentioned_ids_are_deduplicated_in_order() {
        assert_eq!(
            mentioned_ids("<@!7> and <@!3>, again <@!7> but not <@8>"),
            vec!["7", "3"]
        );
        assert!(mentioned_ids("no mentions here").is_empty());
    }

    #[test]
    fn default_reaction_is_unsupported() {
        let sink = RecordingSink::new();
        assert!(!sink.can_react());
        assert!(matches!(
            sink.react("thumbsup"),
            Err(ReplyError::ReactionsUnsupported)
        ));
        sink.send_message("hello").expect("send");
        assert_eq!(sink.last().as_deref(), Some("hello"));
    }
}
