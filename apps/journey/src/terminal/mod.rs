//! # Terminal Front-End
//!
//! Draws panels as text on stdout and reads actions from stdin.
//!
//! ## Event Loop
//!
//! One task, three event sources under `tokio::select!`:
//!
//! - stdin lines, parsed by [`InputParser`] and dispatched to the controller
//! - an interval that ticks the controller's timeline
//! - Ctrl+C, routed through the [`ExitGuard`]
//!
//! The controller is owned by the loop; nothing else touches it.

mod input;

pub use input::{Command, InputParser, MESSAGE_PROMPT, NAME_PROMPT};

use crate::clock::{MonotonicTime, SystemClock};
use crate::config::JourneyConfig;
use journey_core::{
    Action, Control, Effect, FeedbackStore, JourneyError, Panel, Presenter, StageController,
};
use rand::seq::SliceRandom;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

/// Warning shown on the first exit request while the journey is locked.
pub const EXIT_WARNING: &str = "Are you sure you want to leave? Your progress will be lost!";

const RULE: &str = "════════════════════════════════════════════════════════";

// =============================================================================
// PRESENTER
// =============================================================================

/// [`Presenter`] writing plain text to any writer.
pub struct TerminalPresenter<W: Write> {
    out: W,
    current: Option<Panel>,
}

impl<W: Write> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out, current: None }
    }

    /// The panel currently on screen.
    #[must_use]
    pub fn current(&self) -> Option<&Panel> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn output(&self) -> &W {
        &self.out
    }

    /// Print a free-form line outside any panel.
    pub fn say(&mut self, text: &str) {
        self.write(text);
    }

    fn write(&mut self, text: &str) {
        let written = writeln!(self.out, "{}", text).and_then(|()| self.out.flush());
        if let Err(e) = written {
            tracing::warn!(event = "write_failed", error = %e, "Cannot write to terminal");
        }
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show(&mut self, panel: &Panel) {
        let text = render_panel(panel);
        self.write(&text);
        self.current = Some(panel.clone());
    }

    fn effect(&mut self, effect: Effect) {
        if let Some(text) = describe_effect(&effect) {
            self.write(&text);
        }
    }
}

/// Text rendering of a panel.
#[must_use]
pub fn render_panel(panel: &Panel) -> String {
    let mut text = format!("\n{}\n  {}\n", RULE, panel.title);

    if let Some(percent) = panel.progress {
        let filled = usize::from(percent.min(100) / 10);
        text.push_str(&format!(
            "  [{}{}] {}%\n",
            "■".repeat(filled),
            "□".repeat(10 - filled),
            percent
        ));
    }
    text.push_str(RULE);
    text.push('\n');

    for line in &panel.lines {
        text.push_str(&format!("  {}\n", line));
    }
    text.push('\n');

    let typed = panel.input_field().is_some();
    let mut button = 0usize;
    for control in &panel.controls {
        match control {
            Control::TextInput {
                placeholder,
                flagged,
                ..
            } => {
                let mark = if *flagged { " ⚠" } else { "" };
                text.push_str(&format!("  ✎ {}{}\n", placeholder, mark));
            }
            Control::Button { label, .. } if typed => {
                text.push_str(&format!("  ⏎ {}\n", label));
            }
            Control::Button { label, action } => match action {
                Action::CheckPuzzle => text.push_str(&format!("  [check] {}\n", label)),
                Action::ResetPuzzle => text.push_str(&format!("  [reset] {}\n", label)),
                _ => {
                    button += 1;
                    text.push_str(&format!("  [{}] {}\n", button, label));
                }
            },
            Control::Cards { cards, selected } => {
                for (i, card) in cards.iter().enumerate() {
                    let mark = if *selected == Some(i) { "✓" } else { " " };
                    text.push_str(&format!(
                        "  {} ({}) {}: {}\n",
                        mark,
                        i + 1,
                        card.label,
                        card.caption
                    ));
                }
            }
            Control::Tiles(tiles) => {
                let shown: Vec<String> = tiles
                    .iter()
                    .enumerate()
                    .map(|(i, tile)| {
                        if tile.used {
                            format!("[{}] ·", i + 1)
                        } else {
                            format!("[{}] {}", i + 1, tile.token.letter)
                        }
                    })
                    .collect();
                text.push_str(&format!("  Letters: {}\n", shown.join("  ")));
            }
            Control::Slots(slots) => {
                let shown: Vec<String> = slots
                    .iter()
                    .map(|slot| slot.map_or_else(|| "_".to_string(), |c| c.to_string()))
                    .collect();
                text.push_str(&format!("  Word:    {}\n", shown.join(" ")));
            }
            Control::FeedbackForm { sent: false } => {
                text.push_str("  💌 Leave a message: type your name, press Enter, then your message.\n");
                text.push_str(NAME_PROMPT);
                text.push('\n');
            }
            Control::FeedbackForm { sent: true } => {
                text.push_str("  💌 Message sent! Thank you.\n");
            }
        }
    }
    text
}

/// Text for an effect, if it has a visible form in the terminal.
#[must_use]
pub fn describe_effect(effect: &Effect) -> Option<String> {
    match effect {
        Effect::ExitAnimation { .. } | Effect::FinishReady | Effect::ClearFlag(_) => None,
        Effect::Particles => Some("  · ✧ · ✦ · ✧ · ✦ · ✧ ·".to_string()),
        Effect::Confetti => Some("  🎊 🎉 🎊 🎉 🎊 🎉 🎊".to_string()),
        Effect::Shake => Some("  *rattle* *rattle* 🔒".to_string()),
        Effect::FlagInput(_) => Some("  ⚠".to_string()),
        Effect::Notice(message) => Some(format!("  ❗ {}", message)),
        Effect::Success(message) => Some(format!("  ✅ {}", message)),
        Effect::FeedbackSent => Some("  💌 Message sent!".to_string()),
    }
}

/// Generic usage hints.
#[must_use]
pub fn help_text() -> String {
    [
        "  Type a number to press a button or pick a card.",
        "  On a question, type your answer and press Enter.",
        "  On the puzzle, type a tile number or letter; `check` or `reset` when done.",
        "  Type `quit` to leave.",
    ]
    .join("\n")
}

// =============================================================================
// EXIT GUARD
// =============================================================================

/// Two-step confirmation for leaving while the journey is locked.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExitGuard {
    armed: bool,
}

impl ExitGuard {
    /// Register an exit request. Returns `true` when the process may exit.
    pub fn request(&mut self, guarded: bool) -> bool {
        if !guarded || self.armed {
            return true;
        }
        self.armed = true;
        false
    }

    /// Any other input cancels a pending confirmation.
    pub fn disarm(&mut self) {
        self.armed = false;
    }
}

// =============================================================================
// EVENT LOOP
// =============================================================================

type TerminalJourney<S> = StageController<TerminalPresenter<std::io::Stdout>, S, SystemClock>;

/// Run the journey on the terminal until the user leaves or stdin closes.
pub async fn run<S: FeedbackStore>(config: &JourneyConfig, store: S) -> Result<(), JourneyError> {
    let mut journey: TerminalJourney<S> =
        StageController::new(TerminalPresenter::new(std::io::stdout()), store, SystemClock)
            .with_tile_shuffle(|order| order.shuffle(&mut rand::rng()));
    let time = MonotonicTime::start();
    journey.start(time.now())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut parser = InputParser::new();
    let mut guard = ExitGuard::default();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = journey.tick(time.now()) {
                    report(&mut journey, &e);
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal.map_err(|e| JourneyError::IoError(e.to_string()))?;
                if confirm_exit(&mut journey, &mut guard) {
                    break;
                }
            }
            line = lines.next_line() => {
                let line = line.map_err(|e| JourneyError::IoError(e.to_string()))?;
                let Some(line) = line else {
                    tracing::debug!(event = "stdin_closed", "Input closed");
                    break;
                };

                let command = parser.parse(&line, journey.presenter().current());
                if command != Command::Quit {
                    guard.disarm();
                }

                match command {
                    Command::Quit => {
                        if confirm_exit(&mut journey, &mut guard) {
                            break;
                        }
                    }
                    Command::Help => {
                        journey.presenter_mut().say(&help_text());
                        if parser.awaiting_message() {
                            journey.presenter_mut().say(MESSAGE_PROMPT);
                        }
                    }
                    Command::Prompt(prompt) => journey.presenter_mut().say(prompt),
                    Command::Ignored => {}
                    Command::Unknown(text) => journey.presenter_mut().say(&format!(
                        "  Not sure what \"{}\" means. Type help for options.",
                        text
                    )),
                    Command::Actions(actions) => {
                        let now = time.now();
                        if let Err(e) = journey.tick(now) {
                            report(&mut journey, &e);
                        }
                        for action in actions {
                            tracing::debug!(
                                event = "action",
                                action = action.name(),
                                at_ms = now.value(),
                                "Dispatching action"
                            );
                            let sender = match &action {
                                Action::SendFeedback { name, .. } => Some(name.clone()),
                                _ => None,
                            };
                            if let Err(e) = journey.dispatch(now, action) {
                                report(&mut journey, &e);
                                if let (JourneyError::Rejected(rejection), Some(name)) = (&e, sender) {
                                    let prompt = parser.feedback_refused(name, rejection);
                                    journey.presenter_mut().say(prompt);
                                }
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    tracing::info!(
        event = "journey_closed",
        stage = %journey.session().stage(),
        "Journey closed"
    );
    Ok(())
}

fn confirm_exit<S: FeedbackStore>(journey: &mut TerminalJourney<S>, guard: &mut ExitGuard) -> bool {
    if guard.request(journey.guards_exit()) {
        return true;
    }
    journey
        .presenter_mut()
        .say(&format!("\n  {}\n  (Ctrl+C or `quit` again to leave)", EXIT_WARNING));
    false
}

fn report<S: FeedbackStore>(journey: &mut TerminalJourney<S>, error: &JourneyError) {
    match error {
        JourneyError::Rejected(rejection) => {
            tracing::debug!(event = "input_rejected", reason = %rejection, "Input rejected");
        }
        JourneyError::Unavailable { .. }
        | JourneyError::TokenUnavailable(_)
        | JourneyError::UnknownCard(_) => {
            tracing::debug!(event = "action_ignored", error = %error, "Action ignored");
            journey
                .presenter_mut()
                .say("  That doesn't do anything here. Type help for options.");
        }
        JourneyError::NoRenderer { index } => {
            tracing::error!(event = "no_renderer", index = *index, "No renderer for stage");
            journey.presenter_mut().say("  ❗ Something went wrong showing this step.");
        }
        other => {
            tracing::error!(event = "journey_error", error = %other, "Journey error");
            journey.presenter_mut().say(&format!("  ❗ {}", other));
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
