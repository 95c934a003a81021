use boardbot::chat::{mentioned_ids, ChatMessage, Participant, RecordingSink};
use boardbot::commands::default_registry;
use boardbot::dispatch::{BoardRouting, DispatchOutcome, Dispatcher, Rejection};
use boardbot::integrations::{Card, Integrations, MemoryTracker, TRACKER_INTEGRATION};
use std::sync::Arc;

fn card(id: &str, name: &str, assignee: Option<&str>) -> Card {
    Card {
        id: id.to_string(),
        name: name.to_string(),
        assignee: assignee.map(str::to_string),
    }
}

fn cards_assigned_to(owner: &str) -> Vec<Card> {
    vec![
        card("1", "Card 1", Some(owner)),
        card("2", "Card 2", Some(owner)),
        card("3", "Attach", Some(owner)),
        card("4", "Prepare", Some(owner)),
    ]
}

fn setup(cards: Vec<Card>) -> (Dispatcher, Arc<MemoryTracker>) {
    let tracker = Arc::new(MemoryTracker::new(cards));
    let dispatcher = Dispatcher::new(
        default_registry(),
        Integrations::new().with_tracker(TRACKER_INTEGRATION, tracker.clone()),
    )
    .with_boards(BoardRouting::single("ZVcDitv0"));
    (dispatcher, tracker)
}

fn message(content: &str, author: &str) -> ChatMessage {
    mentioned_ids(content).into_iter().fold(
        ChatMessage::new(
            content,
            Participant::new(author.to_lowercase(), author),
        ),
        |message, id| message.with_mention(Participant::new(id, format!("User {id}"))),
    )
}

fn send(dispatcher: &Dispatcher, content: &str, author: &str) -> (DispatchOutcome, RecordingSink) {
    let sink = RecordingSink::new();
    let outcome = dispatcher
        .on_message(&message(content, author), &sink)
        .expect("dispatch");
    (outcome, sink)
}

fn assignee(tracker: &MemoryTracker, name: &str) -> Option<String> {
    tracker.card_named(name).expect("card exists").assignee
}

#[test]
fn unassigns_a_single_card_from_the_author() {
    let (dispatcher, tracker) = setup(cards_assigned_to("user-2"));
    let (outcome, sink) = send(&dispatcher, "!unassign Attach", "user-2");

    assert!(matches!(outcome, DispatchOutcome::Completed { .. }));
    assert_eq!(
        sink.last().as_deref(),
        Some("Unassigned <@!user-2> from Attach")
    );
    assert_eq!(assignee(&tracker, "Attach").as_deref(), Some(""));
}

#[test]
fn unassigns_by_partial_name() {
    let (dispatcher, tracker) = setup(cards_assigned_to("user-2"));
    let (_, sink) = send(&dispatcher, "!unassign Prep", "user-2");

    assert_eq!(
        sink.last().as_deref(),
        Some("Unassigned <@!user-2> from Prepare")
    );
    assert_eq!(assignee(&tracker, "Prepare").as_deref(), Some(""));
}

#[test]
fn ambiguous_fragment_is_rejected_without_changes() {
    let (dispatcher, tracker) = setup(cards_assigned_to("Author"));
    let (outcome, sink) = send(&dispatcher, "!unassign Card", "Author");

    assert!(matches!(
        outcome,
        DispatchOutcome::Rejected {
            rejection: Rejection::Ambiguous,
            ..
        }
    ));
    assert_eq!(
        sink.last().as_deref(),
        Some("Name \"Card\" too ambiguous, 2 matches found: Card 1, Card 2")
    );
    assert_eq!(assignee(&tracker, "Card 1").as_deref(), Some("Author"));
}

#[test]
fn unmatched_fragment_is_reported() {
    let (dispatcher, _) = setup(cards_assigned_to("Author"));
    let (_, sink) = send(&dispatcher, "!unassign Chestnut", "Author");

    assert_eq!(sink.last().as_deref(), Some("Card \"Chestnut\" not found"));
}

#[test]
fn unassigns_a_list_of_cards() {
    let (dispatcher, tracker) = setup(cards_assigned_to("Author"));
    let (_, sink) = send(&dispatcher, "!unassign Attach, 'Card 1'", "Author");

    assert_eq!(
        sink.last().as_deref(),
        Some("Unassigned <@!author> from Attach, Card 1")
    );
    assert_eq!(assignee(&tracker, "Attach").as_deref(), Some(""));
    assert_eq!(assignee(&tracker, "Card 1").as_deref(), Some(""));
    assert_eq!(assignee(&tracker, "Card 2").as_deref(), Some("Author"));
}

#[test]
fn unassigns_a_mentioned_user() {
    let (dispatcher, tracker) = setup(cards_assigned_to("User user"));
    let (_, sink) = send(&dispatcher, "!unassign <@!user> from Prepare", "Author");

    assert_eq!(
        sink.last().as_deref(),
        Some("Unassigned <@!user> from Prepare")
    );
    assert_eq!(assignee(&tracker, "Prepare").as_deref(), Some(""));
}

#[test]
fn card_owned_by_someone_else_is_not_cleared() {
    let mut cards = cards_assigned_to("Author");
    cards[3].assignee = Some("Someone else".to_string());
    let (dispatcher, tracker) = setup(cards);
    let (outcome, sink) = send(&dispatcher, "!unassign Attach, Prepare", "Author");

    assert_eq!(
        outcome,
        DispatchOutcome::Rejected {
            command: "unassign".to_string(),
            rejection: Rejection::NotAssigned,
        }
    );
    assert_eq!(
        sink.last().as_deref(),
        Some("The card 'Prepare' is not assigned to <@!author>")
    );
    assert_eq!(assignee(&tracker, "Attach").as_deref(), Some("Author"));
    assert_eq!(assignee(&tracker, "Prepare").as_deref(), Some("Someone else"));
}

#[test]
fn unassigned_card_is_rejected() {
    let mut cards = cards_assigned_to("Author");
    cards.push(card("11", "Multi word card", None));
    let (dispatcher, _) = setup(cards);
    let (_, sink) = send(&dispatcher, "!unassign Multi word", "Author");

    assert_eq!(
        sink.last().as_deref(),
        Some("The card 'Multi word card' is not assigned to <@!author>")
    );
}

#[test]
fn exact_name_wins_over_longer_matches() {
    let mut cards = cards_assigned_to("Author");
    cards.push(card("11", "Ambiguo", Some("Author")));
    cards.push(card("10", "Ambiguous", Some("Author")));
    let (dispatcher, tracker) = setup(cards);
    let (_, sink) = send(&dispatcher, "!unassign Ambiguo", "Author");

    assert_eq!(
        sink.last().as_deref(),
        Some("Unassigned <@!author> from Ambiguo")
    );
    assert_eq!(assignee(&tracker, "Ambiguous").as_deref(), Some("Author"));
}
