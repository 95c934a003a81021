//! Declarative argument parsing for chat commands.
//!
//! A command declares an ordered list of [`ArgumentSpec`]s. The parser walks
//! the text after the command name from left to right, giving each spec a
//! chance to consume a prefix, and fails unless the whole text is accounted
//! for.

mod parser;
pub mod pattern;

pub use parser::ArgumentParser;
pub use pattern::{RawToken, TokenStrategy};

use crate::chat::Participant;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    Participant,
    Text,
    Any,
}

impl ArgumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Participant => "participant",
            Self::Text => "text",
            Self::Any => "any",
        }
    }

    pub fn accepts(self, token: &Token) -> bool {
        match (self, token) {
            (Self::Any, _) => true,
            (Self::Participant, Token::Participant(_)) => true,
            (Self::Text, Token::Text(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ArgumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: Option<&'static str>,
    pub kind: ArgumentType,
    pub is_array: bool,
    pub optional: bool,
    /// Literal that must directly follow the value, leading whitespace included.
    pub suffix: Option<&'static str>,
}

impl ArgumentSpec {
    pub const fn new(kind: ArgumentType) -> Self {
        Self {
            name: None,
            kind,
            is_array: false,
            optional: false,
            suffix: None,
        }
    }

    pub const fn any() -> Self {
        Self::new(ArgumentType::Any)
    }

    pub const fn named(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    pub const fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub const fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = Some(suffix);
        self
    }
}

/// A spec with its position in the list, fixed when a parser is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InnerArgumentSpec {
    pub spec: ArgumentSpec,
    pub index: usize,
    pub is_last: bool,
}

impl InnerArgumentSpec {
    /// Name used in error messages: the spec name, or `[index]`.
    pub fn label(&self) -> String {
        match self.spec.name {
            Some(name) => name.to_string(),
            None => format!("[{}]", self.index),
        }
    }

    pub fn strategy(&self) -> TokenStrategy {
        TokenStrategy::for_spec(self.spec.is_array, self.is_last)
    }
}

/// One extracted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Participant(Participant),
    Text(String),
}

impl Token {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Participant(_) => None,
        }
    }

    pub fn as_participant(&self) -> Option<&Participant> {
        match self {
            Self::Participant(participant) => Some(participant),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Participant(participant) => write!(f, "{participant}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Participant(Participant),
    Text(String),
    List(Vec<Token>),
}

impl From<Token> for Argument {
    fn from(token: Token) -> Self {
        match token {
            Token::Participant(participant) => Self::Participant(participant),
            Token::Text(text) => Self::Text(text),
        }
    }
}

impl Argument {
    pub fn as_participant(&self) -> Option<&Participant> {
        match self {
            Self::Participant(participant) => Some(participant),
            Self::Text(_) | Self::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Token]> {
        match self {
            Self::List(tokens) => Some(tokens),
            Self::Participant(_) | Self::Text(_) => None,
        }
    }

    /// Text elements of a list argument; `None` if any element is not text.
    pub fn text_list(&self) -> Option<Vec<&str>> {
        self.as_list()?.iter().map(Token::as_text).collect()
    }
}

/// Parsed values, addressable by position and by spec name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<Option<Argument>>,
    by_name: BTreeMap<String, Argument>,
    consumed: Vec<Option<Range<usize>>>,
}

impl Arguments {
    pub(crate) fn with_len(len: usize) -> Self {
        Self {
            values: vec![None; len],
            by_name: BTreeMap::new(),
            consumed: vec![None; len],
        }
    }

    pub(crate) fn fill(&mut self, spec: &InnerArgumentSpec, value: Argument, span: Range<usize>) {
        if let Some(name) = spec.spec.name {
            self.by_name.insert(name.to_string(), value.clone());
        }
        self.values[spec.index] = Some(value);
        self.consumed[spec.index] = Some(span);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Argument> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub fn values(&self) -> &[Option<Argument>] {
        &self.values
    }

    pub fn by_name(&self, name: &str) -> Option<&Argument> {
        self.by_name.get(name)
    }

    /// Byte range of the input consumed by the spec at `index`, suffix included.
    pub fn consumed(&self, index: usize) -> Option<Range<usize>> {
        self.consumed.get(index).cloned().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("Unable to get match for argument {argument} from string \"{remaining}\"")]
    NoMatch { argument: String, remaining: String },
    #[error("Unable to find user from id {id}")]
    UnknownParticipant { id: String },
    #[error("Found argument \"{found}\" of wrong type (expected {expected})")]
    WrongType {
        found: String,
        expected: ArgumentType,
    },
    #[error("Could not find required suffix \"{suffix}\" to argument {argument}")]
    MissingSuffix { suffix: String, argument: String },
    #[error("Whole message was not parseable. \"{remaining}\" could not be put into an argument")]
    Unparsed { remaining: String },
}
