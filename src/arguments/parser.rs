use super::pattern::{RawToken, TokenMatch};
use super::{
    Argument, ArgumentError, ArgumentSpec, Arguments, InnerArgumentSpec, Token, TokenStrategy,
};
use crate::chat::MentionResolver;

/// What one spec did with the input at the cursor.
#[derive(Debug)]
enum SpecOutcome {
    Filled { value: Argument, end: usize },
    Skipped,
}

#[derive(Debug, Clone)]
pub struct ArgumentParser {
    specs: Vec<InnerArgumentSpec>,
}

impl ArgumentParser {
    pub fn new(specs: &[ArgumentSpec]) -> Self {
        let last = specs.len().saturating_sub(1);
        let specs = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| InnerArgumentSpec {
                spec: *spec,
                index,
                is_last: index == last,
            })
            .collect();
        Self { specs }
    }

    pub fn specs(&self) -> &[InnerArgumentSpec] {
        &self.specs
    }

    pub fn parse<R>(&self, input: &str, resolver: &R) -> Result<Arguments, ArgumentError>
    where
        R: MentionResolver + ?Sized,
    {
        let mut args = Arguments::with_len(self.specs.len());
        let mut cursor = skip_whitespace(input, 0);

        for spec in &self.specs {
            if let SpecOutcome::Filled { value, end } = parse_spec(spec, input, cursor, resolver)? {
                args.fill(spec, value, cursor..end);
                cursor = end;
            }
            cursor = skip_whitespace(input, cursor);
        }

        if cursor < input.len() {
            return Err(ArgumentError::Unparsed {
                remaining: input[cursor..].to_string(),
            });
        }
        Ok(args)
    }

    /// One-line synopsis, e.g. `[<user> to] <cards>, ...`.
    pub fn usage(&self) -> String {
        self.specs
            .iter()
            .map(|inner| {
                let name = match inner.spec.name {
                    Some(name) => name.to_string(),
                    None => format!("arg{}", inner.index),
                };
                let mut part = format!("<{name}>");
                if inner.spec.is_array {
                    part.push_str(", ...");
                }
                if let Some(suffix) = inner.spec.suffix {
                    part.push_str(suffix);
                }
                if inner.spec.optional {
                    part = format!("[{part}]");
                }
                part
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn skip_whitespace(input: &str, cursor: usize) -> usize {
    let rest = &input[cursor..];
    cursor + (rest.len() - rest.trim_start().len())
}

fn parse_spec<R>(
    spec: &InnerArgumentSpec,
    input: &str,
    start: usize,
    resolver: &R,
) -> Result<SpecOutcome, ArgumentError>
where
    R: MentionResolver + ?Sized,
{
    let strategy = spec.strategy();
    let Some(first) = strategy.match_start(&input[start..]) else {
        if spec.spec.optional {
            return Ok(SpecOutcome::Skipped);
        }
        return Err(ArgumentError::NoMatch {
            argument: spec.label(),
            remaining: input[start..].to_string(),
        });
    };

    let (value, mut end) = if strategy.is_list() {
        collect_list(strategy, first, input, start, resolver)?
    } else {
        let token = resolve_token(first.token, resolver)?;
        (Argument::from(token), start + first.len)
    };

    if let Some(suffix) = spec.spec.suffix {
        if input[end..].starts_with(suffix) {
            end += suffix.len();
        } else if spec.spec.optional {
            return Ok(SpecOutcome::Skipped);
        } else {
            return Err(ArgumentError::MissingSuffix {
                suffix: suffix.to_string(),
                argument: spec.label(),
            });
        }
    }

    check_type(spec, &value)?;
    Ok(SpecOutcome::Filled { value, end })
}

fn collect_list<R>(
    strategy: TokenStrategy,
    first: TokenMatch<'_>,
    input: &str,
    start: usize,
    resolver: &R,
) -> Result<(Argument, usize), ArgumentError>
where
    R: MentionResolver + ?Sized,
{
    let mut tokens = Vec::new();
    let mut current = first;
    let mut cursor = start;
    loop {
        tokens.push(resolve_token(current.token, resolver)?);
        cursor += current.len;
        if !current.continues {
            break;
        }
        let next = skip_whitespace(input, cursor);
        match strategy.match_start(&input[next..]) {
            Some(found) => {
                current = found;
                cursor = next;
            }
            None => break,
        }
    }
    Ok((Argument::List(tokens), cursor))
}

fn resolve_token<R>(raw: RawToken<'_>, resolver: &R) -> Result<Token, ArgumentError>
where
    R: MentionResolver + ?Sized,
{
    match raw {
        RawToken::Mention(id) => resolver
            .resolve_mention(id)
            .map(Token::Participant)
            .ok_or_else(|| ArgumentError::UnknownParticipant { id: id.to_string() }),
        RawToken::Quoted(text) | RawToken::Bare(text) => Ok(Token::Text(text.to_string())),
    }
}

fn check_type(spec: &InnerArgumentSpec, value: &Argument) -> Result<(), ArgumentError> {
    let expected = spec.spec.kind;
    let offending = match value {
        Argument::List(tokens) => tokens.iter().find(|token| !expected.accepts(token)).cloned(),
        Argument::Participant(participant) => {
            Some(Token::Participant(participant.clone())).filter(|token| !expected.accepts(token))
        }
        Argument::Text(text) => {
            Some(Token::Text(text.clone())).filter(|token| !expected.accepts(token))
        }
    };
    match offending {
        Some(token) => Err(ArgumentError::WrongType {
            found: token.to_string(),
            expected,
        }),
        None => Ok(()),
    }
}
