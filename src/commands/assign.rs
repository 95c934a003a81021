use super::{
    card_fragments, join_names, pick_all, reject, target_participant, Picked, CARDS_ARG, USER_ARG,
};
use crate::arguments::{ArgumentSpec, ArgumentType, Arguments};
use crate::dispatch::{CommandContext, CommandDef, CommandError, CommandOutcome};
use crate::integrations::TRACKER_INTEGRATION;

const ASSIGN_ARGS: &[ArgumentSpec] = &[
    ArgumentSpec::new(ArgumentType::Participant)
        .named(USER_ARG)
        .optional()
        .suffix(" to"),
    ArgumentSpec::new(ArgumentType::Text).named(CARDS_ARG).array(),
];

pub const ASSIGN_CARD: CommandDef = CommandDef {
    name: "Assign Card",
    command_name: "assign",
    description: "Assign cards on the board to a user (defaults to you)",
    arguments: ASSIGN_ARGS,
    run: assign_card,
};

fn assign_card(ctx: &CommandContext<'_>, args: &Arguments) -> Result<CommandOutcome, CommandError> {
    let user = target_participant(ctx, args);
    let fragments = card_fragments(args)?;
    let tracker = ctx.tracker(TRACKER_INTEGRATION)?;
    let board_id = ctx.board_id()?;

    let cards = match pick_all(&fragments, |fragment| {
        Ok(tracker.find_cards(board_id, fragment)?)
    })? {
        Picked::Cards(cards) => cards,
        Picked::Rejected(message, rejection) => return reject(ctx, &message, rejection),
    };

    for card in &cards {
        tracker.set_assignee(board_id, &card.id, &user.name)?;
    }

    ctx.send_message(&format!("Assigned {user} to {}", join_names(&cards)))?;
    Ok(CommandOutcome::Completed)
}
