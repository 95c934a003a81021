use super::{
    card_fragments, join_names, pick_all, reject, target_participant, Picked, CARDS_ARG, USER_ARG,
};
use crate::arguments::{ArgumentSpec, ArgumentType, Arguments};
use crate::dispatch::{CommandContext, CommandDef, CommandError, CommandOutcome, Rejection};
use crate::integrations::TRACKER_INTEGRATION;

const UNASSIGN_ARGS: &[ArgumentSpec] = &[
    ArgumentSpec::new(ArgumentType::Participant)
        .named(USER_ARG)
        .optional()
        .suffix(" from"),
    ArgumentSpec::new(ArgumentType::Text).named(CARDS_ARG).array(),
];

pub const UNASSIGN_CARD: CommandDef = CommandDef {
    name: "Unassign Card",
    command_name: "unassign",
    description: "Unassign cards on the board from a user (defaults to you)",
    arguments: UNASSIGN_ARGS,
    run: unassign_card,
};

fn unassign_card(
    ctx: &CommandContext<'_>,
    args: &Arguments,
) -> Result<CommandOutcome, CommandError> {
    let user = target_participant(ctx, args);
    let fragments = card_fragments(args)?;
    let tracker = ctx.tracker(TRACKER_INTEGRATION)?;
    let board_id = ctx.board_id()?;

    let all_cards = tracker.list_cards(board_id)?;
    let cards = match pick_all(&fragments, |fragment| {
        let needle = fragment.to_lowercase();
        Ok(all_cards
            .iter()
            .filter(|card| card.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    })? {
        Picked::Cards(cards) => cards,
        Picked::Rejected(message, rejection) => return reject(ctx, &message, rejection),
    };

    // Nothing is cleared unless every card belongs to the user.
    if let Some(card) = cards
        .iter()
        .find(|card| card.assignee.as_deref() != Some(user.name.as_str()))
    {
        let message = format!("The card '{}' is not assigned to {user}", card.name);
        return reject(ctx, &message, Rejection::NotAssigned);
    }

    for card in &cards {
        tracker.set_assignee(board_id, &card.id, "")?;
    }

    ctx.send_message(&format!("Unassigned {user} from {}", join_names(&cards)))?;
    Ok(CommandOutcome::Completed)
}
