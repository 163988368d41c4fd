//! # Compositor
//!
//! Builds the panel for the current stage.
//!
//! The Compositor outputs raw structured panels only: a title, text lines,
//! an optional progress value and the interactive controls. No markup, no
//! styling. Dispatch is an enum-keyed table; a stage without a builder is an
//! explicit [`JourneyError::NoRenderer`].

use crate::primitives::{CardSpec, GALLERY_CARDS, MEMORY_CARDS};
use crate::puzzle::PuzzleToken;
use crate::session::SessionState;
use crate::{Action, Answer, InputField, JourneyError, Stage};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// PANEL
// =============================================================================

/// A selectable card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub label: String,
    pub caption: String,
}

impl From<&CardSpec> for Card {
    fn from(spec: &CardSpec) -> Self {
        Self {
            label: spec.0.to_string(),
            caption: spec.1.to_string(),
        }
    }
}

/// A puzzle tile as displayed: the token and whether it is already placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub token: PuzzleToken,
    pub used: bool,
}

/// Interactive element of a panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Control {
    /// Single-line text input; `value` is the last recorded answer.
    TextInput {
        field: InputField,
        placeholder: String,
        value: String,
        flagged: bool,
    },
    /// Button reporting `action` when pressed.
    Button { label: String, action: Action },
    /// Cards reporting `Action::Select(index)`.
    Cards {
        cards: Vec<Card>,
        selected: Option<usize>,
    },
    /// Puzzle tiles reporting `Action::PlaceLetter(id)`.
    Tiles(Vec<Tile>),
    /// Puzzle slots, `None` for an empty slot.
    Slots(Vec<Option<char>>),
    /// Name + message form reporting `Action::SendFeedback`.
    FeedbackForm { sent: bool },
}

/// Self-contained description of one stage's screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub stage: Stage,
    pub title: String,
    pub lines: Vec<String>,
    pub progress: Option<u8>,
    pub controls: Vec<Control>,
}

impl Panel {
    fn new(stage: Stage, title: &str) -> Self {
        Self {
            stage,
            title: title.to_string(),
            lines: Vec::new(),
            progress: stage.progress_percent(),
            controls: Vec::new(),
        }
    }

    fn line(mut self, text: &str) -> Self {
        self.lines.push(text.to_string());
        self
    }

    fn control(mut self, control: Control) -> Self {
        self.controls.push(control);
        self
    }

    fn button(self, label: &str, action: Action) -> Self {
        self.control(Control::Button {
            label: label.to_string(),
            action,
        })
    }

    fn text_input(self, session: &SessionState, field: InputField, placeholder: &str) -> Self {
        let value = field
            .answer()
            .and_then(|key| session.answer(key))
            .unwrap_or_default()
            .to_string();
        self.control(Control::TextInput {
            field,
            placeholder: placeholder.to_string(),
            value,
            flagged: session.flagged() == Some(field),
        })
    }

    /// Buttons on this panel, in display order.
    pub fn buttons(&self) -> impl Iterator<Item = (&str, &Action)> {
        self.controls.iter().filter_map(|c| match c {
            Control::Button { label, action } => Some((label.as_str(), action)),
            _ => None,
        })
    }

    /// The text input on this panel, if any.
    #[must_use]
    pub fn input_field(&self) -> Option<InputField> {
        self.controls.iter().find_map(|c| match c {
            Control::TextInput { field, .. } => Some(*field),
            _ => None,
        })
    }
}

// =============================================================================
// COMPOSITOR
// =============================================================================

/// Builds a panel from the session state.
pub type PanelBuilder = fn(&SessionState) -> Panel;

/// Enum-keyed table of panel builders.
#[derive(Debug, Clone)]
pub struct Compositor {
    builders: BTreeMap<Stage, PanelBuilder>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::standard()
    }
}

impl Compositor {
    /// A compositor with no builders registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            builders: BTreeMap::new(),
        }
    }

    /// The twelve standard panels.
    #[must_use]
    pub fn standard() -> Self {
        let mut compositor = Self::empty();
        compositor.register(Stage::Welcome, welcome);
        compositor.register(Stage::Password, password);
        compositor.register(Stage::AccessGranted, access_granted);
        compositor.register(Stage::Reflection, reflection);
        compositor.register(Stage::Memory, memory);
        compositor.register(Stage::Puzzle, puzzle);
        compositor.register(Stage::Gallery, gallery);
        compositor.register(Stage::SecretCode, secret_code);
        compositor.register(Stage::AlmostThere, almost_there);
        compositor.register(Stage::Unlock, unlock);
        compositor.register(Stage::FinalReveal, final_reveal);
        compositor.register(Stage::Complete, complete);
        compositor
    }

    /// Register (or replace) the builder for a stage.
    pub fn register(&mut self, stage: Stage, builder: PanelBuilder) {
        self.builders.insert(stage, builder);
    }

    /// Compose the panel for the session's current stage.
    pub fn compose(&self, session: &SessionState) -> Result<Panel, JourneyError> {
        let stage = session.stage();
        let builder = self.builders.get(&stage).ok_or(JourneyError::NoRenderer {
            index: stage.index(),
        })?;
        Ok(builder(session))
    }
}

// =============================================================================
// STANDARD PANELS
// =============================================================================

fn welcome(_: &SessionState) -> Panel {
    Panel::new(Stage::Welcome, "Exclusive Birthday Experience")
        .line("A Special Surprise Awaits")
        .line("Someone special prepared this magical journey just for you.")
        .line("Complete the challenges to unlock your surprise.")
        .button("Start the Journey", Action::Continue)
}

fn password(session: &SessionState) -> Panel {
    Panel::new(Stage::Password, "Challenge #1: Access Code")
        .line("Enter the magic word to proceed")
        .line("Hint: Think about whose special day this is...")
        .text_input(session, InputField::Password, "Type your answer here...")
        .button("Submit Answer", Action::Submit)
}

fn access_granted(_: &SessionState) -> Panel {
    Panel::new(Stage::AccessGranted, "Access Granted! ✓")
        .line("Excellent! Preparing your next challenge...")
        .button("Continue Journey", Action::Continue)
}

fn reflection(session: &SessionState) -> Panel {
    Panel::new(Stage::Reflection, "Challenge #2: Reflection")
        .line("In one word, describe how today should be for the birthday celebrant")
        .line("Hint: Think positive and joyful!")
        .text_input(session, InputField::Reflection, "Your answer...")
        .button("Submit Reflection", Action::Submit)
}

fn cards(specs: &[CardSpec], selected: Option<usize>) -> Control {
    Control::Cards {
        cards: specs.iter().map(Card::from).collect(),
        selected,
    }
}

fn memory(session: &SessionState) -> Panel {
    Panel::new(Stage::Memory, "Challenge #3: Choose a Memory")
        .line("Select what represents this celebration best:")
        .control(cards(&MEMORY_CARDS, session.selected_card()))
}

fn puzzle(session: &SessionState) -> Panel {
    let board = session.puzzle();
    let tiles = PuzzleToken::in_order(session.tile_order())
        .map(|token| Tile {
            token,
            used: board.is_used(token.id),
        })
        .collect();

    Panel::new(Stage::Puzzle, "Challenge #4: Word Puzzle")
        .line("Arrange the letters to spell the magic word:")
        .control(Control::Tiles(tiles))
        .control(Control::Slots(board.slots()))
        .button("Check Answer", Action::CheckPuzzle)
        .button("Reset puzzle", Action::ResetPuzzle)
}

fn gallery(session: &SessionState) -> Panel {
    Panel::new(Stage::Gallery, "Halfway There! 🎉")
        .line("Look at what we have prepared for you — pick your favorite highlight:")
        .control(cards(&GALLERY_CARDS, session.selected_card()))
}

fn secret_code(session: &SessionState) -> Panel {
    Panel::new(Stage::SecretCode, "Challenge #5: Time Code")
        .line("Enter the current year to proceed:")
        .line("Hint: What year is it now?")
        .text_input(session, InputField::SecretCode, "YYYY")
        .button("Verify Code", Action::Submit)
}

fn almost_there(_: &SessionState) -> Panel {
    Panel::new(Stage::AlmostThere, "Almost There! ✨")
        .line("You've made it this far! Just one more challenge before the grand reveal...")
        .line("The surprise is waiting for you...")
        .button("Final Challenge", Action::Continue)
}

fn unlock(_: &SessionState) -> Panel {
    Panel::new(Stage::Unlock, "Final Challenge: Unlock")
        .line("Click the button to unlock your surprise! 🎊")
        .line("Get ready to reveal something special...")
        .button("🎁 UNLOCK SURPRISE", Action::Unlock)
}

fn final_reveal(session: &SessionState) -> Panel {
    let panel = Panel::new(Stage::FinalReveal, "Happy Birthday, Kassy! 🎂💖")
        .line("I hope you enjoy your special day to the fullest, filled with happiness, joy, and moments that make you smile every single day. 🌸✨")
        .line("Keep pursuing your dreams and goals; I am so proud of everything you’ve achieved and all that you will accomplish in the future.")
        .line("I also hope we get to create more wonderful memories soon and catch up whenever we can. Remember, I’m always here to support you, no matter what.")
        .line("Wishing you a year filled with love, laughter, and endless possibilities!")
        .control(Control::FeedbackForm {
            sent: session.feedback_sent(),
        });

    if session.finish_ready() {
        panel.button("Finish 💝", Action::Finish)
    } else {
        panel
    }
}

fn complete(_: &SessionState) -> Panel {
    Panel::new(Stage::Complete, "Experience Complete ✓")
        .line("You’ve successfully completed this exclusive birthday journey! 🎊")
        .line("Thank you for being part of this celebration — may your days ahead be filled with happiness and wonder. ✨")
        .button("Restart Experience", Action::Restart)
}

/// Card set of a selection stage and the answer slot it fills.
pub(crate) fn card_set(stage: Stage) -> Option<(&'static [CardSpec], Answer)> {
    match stage {
        Stage::Memory => Some((&MEMORY_CARDS, Answer::Memory)),
        Stage::Gallery => Some((&GALLERY_CARDS, Answer::Gallery)),
        _ => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================
