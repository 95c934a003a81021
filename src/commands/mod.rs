pub mod assign;
pub mod unassign;

use crate::arguments::Arguments;
use crate::chat::Participant;
use crate::dispatch::{CommandContext, CommandError, CommandOutcome, CommandRegistry, Rejection};
use crate::integrations::Card;

/// Ambiguous matches up to this many are listed by name in the reply.
pub const AMBIGUITY_LIST_LIMIT: usize = 3;

pub const USER_ARG: &str = "user";
pub const CARDS_ARG: &str = "cards";

pub fn default_registry() -> CommandRegistry {
    CommandRegistry::new(vec![assign::ASSIGN_CARD, unassign::UNASSIGN_CARD])
}

/// Result of narrowing the cards matching one name fragment down to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardPick {
    Found(Card),
    NotFound(String),
    Ambiguous(String),
}

pub fn pick_card(fragment: &str, mut candidates: Vec<Card>) -> CardPick {
    match candidates.len() {
        0 => CardPick::NotFound(format!("Card \"{fragment}\" not found")),
        1 => CardPick::Found(candidates.remove(0)),
        count => {
            let exact: Vec<usize> = candidates
                .iter()
                .enumerate()
                .filter(|(_, card)| card.name == fragment)
                .map(|(index, _)| index)
                .collect();
            if let [index] = exact.as_slice() {
                return CardPick::Found(candidates.swap_remove(*index));
            }

            let mut message = format!("Name \"{fragment}\" too ambiguous, {count} matches found");
            if count <= AMBIGUITY_LIST_LIMIT {
                message.push_str(": ");
                message.push_str(&join_names(&candidates));
            } else {
                message.push('.');
            }
            CardPick::Ambiguous(message)
        }
    }
}

pub fn join_names(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) enum Picked {
    Cards(Vec<Card>),
    Rejected(String, Rejection),
}

/// Picks one card per fragment, stopping at the first fragment that fails.
pub(crate) fn pick_all<F>(fragments: &[&str], mut candidates_for: F) -> Result<Picked, CommandError>
where
    F: FnMut(&str) -> Result<Vec<Card>, CommandError>,
{
    let mut picked = Vec::with_capacity(fragments.len());
    for fragment in fragments {
        match pick_card(fragment, candidates_for(fragment)?) {
            CardPick::Found(card) => picked.push(card),
            CardPick::NotFound(message) => {
                return Ok(Picked::Rejected(message, Rejection::NotFound))
            }
            CardPick::Ambiguous(message) => {
                return Ok(Picked::Rejected(message, Rejection::Ambiguous))
            }
        }
    }
    Ok(Picked::Cards(picked))
}

pub(crate) fn target_participant<'a>(
    ctx: &'a CommandContext<'_>,
    args: &'a Arguments,
) -> &'a Participant {
    args.by_name(USER_ARG)
        .and_then(|arg| arg.as_participant())
        .unwrap_or_else(|| ctx.author())
}

pub(crate) fn card_fragments(args: &Arguments) -> Result<Vec<&str>, CommandError> {
    args.by_name(CARDS_ARG)
        .and_then(|arg| arg.text_list())
        .filter(|fragments| !fragments.is_empty())
        .ok_or_else(|| CommandError::InvalidArgument(CARDS_ARG.to_string()))
}

pub(crate) fn reject(
    ctx: &CommandContext<'_>,
    message: &str,
    rejection: Rejection,
) -> Result<CommandOutcome, CommandError> {
    ctx.send_message(message)?;
    Ok(CommandOutcome::Rejected(rejection))
}
