//! Integration tests for terminal line parsing.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use journey::terminal::{Command, InputParser, MESSAGE_PROMPT, NAME_PROMPT};
use journey_core::{
    Action, Compositor, FeedbackStore, FixedClock, InputField, JourneyError, MemoryFeedbackStore,
    Millis, Panel, RecordingPresenter, Rejection, SessionState, Stage, StageController, TokenId,
};

type Journey = StageController<RecordingPresenter, MemoryFeedbackStore, FixedClock>;

/// A journey showing the final reveal with an open feedback form.
fn final_reveal() -> Journey {
    let mut journey = StageController::new(
        RecordingPresenter::new(),
        MemoryFeedbackStore::new(),
        FixedClock::new(2026, "t"),
    );
    journey.advance(Millis(0), Stage::FinalReveal).unwrap();
    journey
}

/// Parse `line` against the journey's current panel and dispatch the result.
/// A refused send rewinds the parser the way the terminal loop does.
fn send(parser: &mut InputParser, journey: &mut Journey, line: &str) -> Command {
    let panel = journey.presenter().last_panel().cloned();
    let command = parser.parse(line, panel.as_ref());
    let actions = match &command {
        Command::Actions(actions) => actions.clone(),
        _ => return command,
    };
    for action in actions {
        let sender = match &action {
            Action::SendFeedback { name, .. } => Some(name.clone()),
            _ => None,
        };
        if let Err(JourneyError::Rejected(rejection)) = journey.dispatch(Millis(0), action) {
            let name = sender.unwrap();
            return Command::Prompt(parser.feedback_refused(name, &rejection));
        }
    }
    command
}

/// The panel the standard compositor shows for `stage` in a fresh session.
fn panel(stage: Stage) -> Panel {
    let mut journey = StageController::new(
        RecordingPresenter::new(),
        MemoryFeedbackStore::new(),
        FixedClock::new(2026, "t"),
    );
    journey.advance(Millis(0), stage).unwrap();
    journey.presenter().last_panel().unwrap().clone()
}

// =============================================================================
// GLOBAL WORDS
// =============================================================================

#[test]
fn quit_and_help_work_without_a_panel() {
    let mut parser = InputParser::new();
    assert_eq!(parser.parse(" QUIT ", None), Command::Quit);
    assert_eq!(parser.parse("exit", None), Command::Quit);
    assert_eq!(parser.parse("?", None), Command::Help);
    assert_eq!(parser.parse("1", None), Command::Ignored);
}

// =============================================================================
// BUTTONS
// =============================================================================

#[test]
fn enter_presses_the_only_button() {
    let mut parser = InputParser::new();
    let welcome = panel(Stage::Welcome);
    assert_eq!(
        parser.parse("", Some(&welcome)),
        Command::Actions(vec![Action::Continue])
    );
    assert_eq!(
        parser.parse("1", Some(&welcome)),
        Command::Actions(vec![Action::Continue])
    );
    assert_eq!(
        parser.parse("2", Some(&welcome)),
        Command::Unknown("2".to_string())
    );
}

// =============================================================================
// TEXT INPUT
// =============================================================================

#[test]
fn text_becomes_input_then_submit() {
    let mut parser = InputParser::new();
    let code = panel(Stage::SecretCode);
    assert_eq!(
        parser.parse(" 2026 ", Some(&code)),
        Command::Actions(vec![
            Action::Input {
                field: InputField::SecretCode,
                value: "2026".to_string(),
            },
            Action::Submit,
        ])
    );
    assert_eq!(parser.parse("   ", Some(&code)), Command::Ignored);
}

// =============================================================================
// CARDS AND TILES
// =============================================================================

#[test]
fn numbers_pick_cards() {
    let mut parser = InputParser::new();
    let memory = panel(Stage::Memory);
    assert_eq!(
        parser.parse("3", Some(&memory)),
        Command::Actions(vec![Action::Select(2)])
    );
}

#[test]
fn tiles_by_number_letter_and_words() {
    let mut parser = InputParser::new();
    let puzzle = panel(Stage::Puzzle);

    // Display order is P Y H P A.
    assert_eq!(
        parser.parse("3", Some(&puzzle)),
        Command::Actions(vec![Action::PlaceLetter(TokenId(0))])
    );
    assert_eq!(
        parser.parse("a", Some(&puzzle)),
        Command::Actions(vec![Action::PlaceLetter(TokenId(1))])
    );
    assert_eq!(
        parser.parse("P", Some(&puzzle)),
        Command::Actions(vec![Action::PlaceLetter(TokenId(3))])
    );
    assert_eq!(
        parser.parse("check", Some(&puzzle)),
        Command::Actions(vec![Action::CheckPuzzle])
    );
    assert_eq!(
        parser.parse("esc", Some(&puzzle)),
        Command::Actions(vec![Action::ResetPuzzle])
    );
    assert_eq!(
        parser.parse("9", Some(&puzzle)),
        Command::Unknown("9".to_string())
    );
}

// =============================================================================
// FEEDBACK FORM
// =============================================================================

#[test]
fn feedback_form_takes_name_then_message() {
    let mut parser = InputParser::new();
    let reveal = panel(Stage::FinalReveal);

    assert_eq!(
        parser.parse("Ivan", Some(&reveal)),
        Command::Prompt(MESSAGE_PROMPT)
    );
    assert!(parser.awaiting_message());
    assert_eq!(
        parser.parse("Happy birthday my friend", Some(&reveal)),
        Command::Actions(vec![Action::SendFeedback {
            name: "Ivan".to_string(),
            message: "Happy birthday my friend".to_string(),
        }])
    );
    assert!(!parser.awaiting_message());
}

#[test]
fn empty_name_goes_straight_to_validation() {
    let mut parser = InputParser::new();
    let reveal = panel(Stage::FinalReveal);
    assert_eq!(
        parser.parse("", Some(&reveal)),
        Command::Actions(vec![Action::SendFeedback {
            name: String::new(),
            message: String::new(),
        }])
    );
}

#[test]
fn leaving_the_form_forgets_the_name() {
    let mut parser = InputParser::new();
    let reveal = panel(Stage::FinalReveal);
    parser.parse("Ivan", Some(&reveal));

    let welcome = Compositor::standard()
        .compose(&SessionState::new())
        .unwrap();
    parser.parse("1", Some(&welcome));
    assert!(!parser.awaiting_message());
}

#[test]
fn refused_message_keeps_the_name() {
    let mut parser = InputParser::new();
    let mut journey = final_reveal();

    assert_eq!(
        send(&mut parser, &mut journey, "Ivan"),
        Command::Prompt(MESSAGE_PROMPT)
    );
    assert_eq!(
        send(&mut parser, &mut journey, "hi :)"),
        Command::Prompt(MESSAGE_PROMPT)
    );
    assert!(parser.awaiting_message());

    send(&mut parser, &mut journey, "Happy birthday my friend");
    let records = journey.store().records().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Ivan");
    assert_eq!(records[0].message, "Happy birthday my friend");
}

#[test]
fn refused_name_starts_the_form_over() {
    let mut parser = InputParser::new();
    let mut journey = final_reveal();

    send(&mut parser, &mut journey, "Iv4n");
    assert_eq!(
        send(&mut parser, &mut journey, "Happy birthday my friend"),
        Command::Prompt(NAME_PROMPT)
    );
    assert!(!parser.awaiting_message());

    assert_eq!(
        send(&mut parser, &mut journey, "Ivan"),
        Command::Prompt(MESSAGE_PROMPT)
    );
    send(&mut parser, &mut journey, "Happy birthday my friend");
    assert_eq!(journey.store().records().unwrap()[0].name, "Ivan");
}

#[test]
fn empty_message_asks_for_the_message_again() {
    let mut parser = InputParser::new();
    assert_eq!(
        parser.feedback_refused("Ivan".to_string(), &Rejection::MissingMessage),
        MESSAGE_PROMPT
    );
    let reveal = panel(Stage::FinalReveal);
    assert_eq!(
        parser.parse("Many happy returns", Some(&reveal)),
        Command::Actions(vec![Action::SendFeedback {
            name: "Ivan".to_string(),
            message: "Many happy returns".to_string(),
        }])
    );
}
