use regex::Regex;
use std::sync::OnceLock;

/// Single non-last value: a mention, a quoted span, or one whitespace-free word.
pub const WORD_PATTERN: &str = r#"^(?:<@!(\w+)>|"(.*?)"|'(.*?)'|(\S+))"#;
/// Last value: like [`WORD_PATTERN`] but an unquoted value runs to the end of the line.
pub const REST_PATTERN: &str = r#"^(?:<@!(\w+)>|"(.*?)"|'(.*?)'|(.+))"#;
/// List element before other specs: unquoted elements stop at whitespace or a comma.
pub const LIST_WORD_PATTERN: &str = r#"^(?:<@!(\w+)>|"(.*?)"|'(.*?)'|([^\s,]+)),?"#;
/// List element of the last spec: unquoted elements stop at a comma only.
pub const LIST_REST_PATTERN: &str = r#"^(?:<@!(\w+)>|"(.*?)"|'(.*?)'|([^,]+)),?"#;

const MENTION_GROUP: usize = 1;
const DOUBLE_QUOTED_GROUP: usize = 2;
const SINGLE_QUOTED_GROUP: usize = 3;
const BARE_GROUP: usize = 4;

static WORD: OnceLock<Regex> = OnceLock::new();
static REST: OnceLock<Regex> = OnceLock::new();
static LIST_WORD: OnceLock<Regex> = OnceLock::new();
static LIST_REST: OnceLock<Regex> = OnceLock::new();

/// How a spec pulls its next token out of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStrategy {
    Word,
    Rest,
    ListWord,
    ListRest,
}

/// Token text as matched, before mention resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'a> {
    Mention(&'a str),
    Quoted(&'a str),
    Bare(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenMatch<'a> {
    pub token: RawToken<'a>,
    /// Bytes consumed, including quotes and any trailing list comma.
    pub len: usize,
    /// The match ended with a comma, so a list continues.
    pub continues: bool,
}

impl TokenStrategy {
    pub fn for_spec(is_array: bool, is_last: bool) -> Self {
        match (is_array, is_last) {
            (false, false) => Self::Word,
            (false, true) => Self::Rest,
            (true, false) => Self::ListWord,
            (true, true) => Self::ListRest,
        }
    }

    pub fn pattern(self) -> &'static str {
        match self {
            Self::Word => WORD_PATTERN,
            Self::Rest => REST_PATTERN,
            Self::ListWord => LIST_WORD_PATTERN,
            Self::ListRest => LIST_REST_PATTERN,
        }
    }

    pub fn is_list(self) -> bool {
        matches!(self, Self::ListWord | Self::ListRest)
    }

    fn regex(self) -> &'static Regex {
        let cell = match self {
            Self::Word => &WORD,
            Self::Rest => &REST,
            Self::ListWord => &LIST_WORD,
            Self::ListRest => &LIST_REST,
        };
        cell.get_or_init(|| Regex::new(self.pattern()).expect("token pattern is valid"))
    }

    /// Matches one token anchored at the start of `input`.
    pub fn match_start(self, input: &str) -> Option<TokenMatch<'_>> {
        let captures = self.regex().captures(input)?;
        let whole = captures.get(0)?;
        let token = if let Some(id) = captures.get(MENTION_GROUP) {
            RawToken::Mention(id.as_str())
        } else if let Some(text) = captures.get(DOUBLE_QUOTED_GROUP) {
            RawToken::Quoted(text.as_str())
        } else if let Some(text) = captures.get(SINGLE_QUOTED_GROUP) {
            RawToken::Quoted(text.as_str())
        } else {
            RawToken::Bare(captures.get(BARE_GROUP)?.as_str())
        };
        Some(TokenMatch {
            token,
            len: whole.end(),
            continues: self.is_list() && whole.as_str().ends_with(','),
        })
    }
}
