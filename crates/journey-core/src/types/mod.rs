//! # Core Type Definitions
//!
//! This module contains the shared vocabulary of the journey:
//! - Logical time (`Millis`)
//! - Answer keys and input fields (`Answer`, `InputField`)
//! - User actions reported by the presentation (`Action`)
//! - Effects emitted to the presentation (`Effect`)
//! - Validation rejections and errors (`Rejection`, `JourneyError`)
//! - Capability traits at the boundaries (`Clock`, `Presenter`)
//!
//! ## Determinism Guarantees
//!
//! - Time is an integer millisecond count supplied by the caller
//! - All keys implement `Ord` for deterministic ordering in `BTreeMap`
//! - Time arithmetic saturates instead of overflowing

use crate::compositor::Panel;
use crate::puzzle::TokenId;
use crate::system::Stage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// LOGICAL TIME
// =============================================================================

/// A point in logical time, in milliseconds since the journey started.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Millis(pub u64);

impl Millis {
    /// The start of the journey.
    pub const ZERO: Millis = Millis(0);

    /// Create a new instant from a millisecond count.
    #[must_use]
    pub const fn new(ms: u64) -> Self {
        Self(ms)
    }

    /// The instant `delay` after this one.
    #[must_use]
    pub const fn after(self, delay: Millis) -> Self {
        Self(self.0.saturating_add(delay.0))
    }

    /// Get the raw millisecond count.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

// =============================================================================
// ANSWERS & INPUT FIELDS
// =============================================================================

/// Keys of the collected answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Answer {
    Password,
    Reflection,
    Memory,
    Gallery,
    SecretCode,
}

/// Free-text inputs a panel can expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InputField {
    Password,
    Reflection,
    SecretCode,
    SenderName,
    Message,
}

impl InputField {
    /// The answer slot this field writes into, if it is one of the gated answers.
    #[must_use]
    pub fn answer(&self) -> Option<Answer> {
        match self {
            InputField::Password => Some(Answer::Password),
            InputField::Reflection => Some(Answer::Reflection),
            InputField::SecretCode => Some(Answer::SecretCode),
            InputField::SenderName | InputField::Message => None,
        }
    }
}

// =============================================================================
// ACTIONS
// =============================================================================

/// A user action reported back by the presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Plain "next" button (welcome, access granted, almost there).
    Continue,
    /// The value of a text input changed.
    Input { field: InputField, value: String },
    /// Submit the current stage's text input.
    Submit,
    /// Click on a card (memory or gallery), zero-based.
    Select(usize),
    /// Place a puzzle tile.
    PlaceLetter(TokenId),
    /// Check the placed letters.
    CheckPuzzle,
    /// Clear the placed letters.
    ResetPuzzle,
    /// Fire the unlock button.
    Unlock,
    /// Send the feedback form.
    SendFeedback { name: String, message: String },
    /// Dismiss the final reveal.
    Finish,
    /// Start over from the welcome screen.
    Restart,
}

impl Action {
    /// Short stable name, used in errors and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::Continue => "continue",
            Action::Input { .. } => "input",
            Action::Submit => "submit",
            Action::Select(_) => "select",
            Action::PlaceLetter(_) => "place_letter",
            Action::CheckPuzzle => "check_puzzle",
            Action::ResetPuzzle => "reset_puzzle",
            Action::Unlock => "unlock",
            Action::SendFeedback { .. } => "send_feedback",
            Action::Finish => "finish",
            Action::Restart => "restart",
        }
    }
}

// =============================================================================
// EFFECTS
// =============================================================================

/// Decorative and feedback effects emitted to the presentation.
///
/// None of these carry invariants; a presenter may ignore any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// The current panel starts its exit animation.
    ExitAnimation { from: Stage },
    /// Refresh the floating particle field.
    Particles,
    /// Celebratory confetti burst.
    Confetti,
    /// Shake the current panel.
    Shake,
    /// Mark an input as erroneous.
    FlagInput(InputField),
    /// Remove the error mark from an input.
    ClearFlag(InputField),
    /// Blocking notice the user has to acknowledge.
    Notice(String),
    /// Transient success acknowledgement.
    Success(String),
    /// The feedback form was stored.
    FeedbackSent,
    /// The Finish action is now available.
    FinishReady,
}

// =============================================================================
// REJECTIONS
// =============================================================================

/// Why a validator refused the current input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Incorrect password! Try again 💡")]
    WrongPassword,

    #[error("Please enter a meaningful reflection! ✍️")]
    ReflectionTooShort,

    #[error("That’s nice, but think more joyful! 😊")]
    NotJoyful,

    #[error("Try again! Hint: Spell the word that fits the celebration 🧩")]
    PuzzleMismatch,

    #[error("Hint: What year is it now? 📅")]
    WrongYear,

    #[error("Please enter your name 📝")]
    MissingName,

    #[error("Name can only contain letters 🅰️")]
    InvalidName,

    #[error("Please write a message first 💬")]
    MissingMessage,

    #[error("Please write a proper message with real words ✍️")]
    TooFewWords,
}

impl Rejection {
    /// The input to flag for this rejection, if any.
    #[must_use]
    pub fn field(&self) -> Option<InputField> {
        match self {
            Rejection::WrongPassword => Some(InputField::Password),
            Rejection::ReflectionTooShort | Rejection::NotJoyful => Some(InputField::Reflection),
            Rejection::PuzzleMismatch => None,
            Rejection::WrongYear => Some(InputField::SecretCode),
            Rejection::MissingName | Rejection::InvalidName => Some(InputField::SenderName),
            Rejection::MissingMessage | Rejection::TooFewWords => Some(InputField::Message),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the journey.
///
/// - `Rejected` is the only user-recoverable kind; the user simply retries
/// - `NoRenderer` is a programming error and must be logged by the caller
/// - The core never panics
#[derive(Debug, Error)]
pub enum JourneyError {
    /// A validator refused the input.
    #[error("Rejected input: {0}")]
    Rejected(Rejection),

    /// No panel builder is registered for the stage index.
    #[error("No renderer for stage {index}")]
    NoRenderer { index: u8 },

    /// The action is not offered by the current stage.
    #[error("Action '{action}' is not available at stage {stage}")]
    Unavailable { stage: Stage, action: &'static str },

    /// The puzzle tile is unknown, already placed, or the board is full.
    #[error("Puzzle token {0:?} cannot be placed")]
    TokenUnavailable(TokenId),

    /// The card index is outside the card set.
    #[error("Unknown card: {0}")]
    UnknownCard(usize),

    /// Admin passphrase mismatch.
    #[error("Access denied ❌")]
    AccessDenied,

    /// A configuration source could not be read or parsed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<Rejection> for JourneyError {
    fn from(rejection: Rejection) -> Self {
        Self::Rejected(rejection)
    }
}

// =============================================================================
// CAPABILITIES
// =============================================================================

/// Source of calendar facts. The core reads it only at validation and
/// record-building time.
pub trait Clock {
    /// The current calendar year.
    fn current_year(&self) -> i32;

    /// Human-readable local timestamp for feedback records.
    fn timestamp(&self) -> String;
}

/// A clock frozen at a given year and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedClock {
    pub year: i32,
    pub timestamp: String,
}

impl FixedClock {
    /// Create a clock frozen at `year`.
    #[must_use]
    pub fn new(year: i32, timestamp: impl Into<String>) -> Self {
        Self {
            year,
            timestamp: timestamp.into(),
        }
    }
}

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.year
    }

    fn timestamp(&self) -> String {
        self.timestamp.clone()
    }
}

/// The presentation boundary.
///
/// `show` receives every rendered panel; `effect` receives decorative and
/// feedback effects. User actions travel the other way through
/// [`crate::StageController::dispatch`].
pub trait Presenter {
    /// Display a freshly rendered panel, replacing the previous one.
    fn show(&mut self, panel: &Panel);

    /// Play an effect.
    fn effect(&mut self, effect: Effect);
}

/// A presenter that records everything it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    pub panels: Vec<Panel>,
    pub effects: Vec<Effect>,
}

impl RecordingPresenter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently shown panel.
    #[must_use]
    pub fn last_panel(&self) -> Option<&Panel> {
        self.panels.last()
    }

    /// Count effects matching a predicate.
    #[must_use]
    pub fn count_effects(&self, predicate: impl Fn(&Effect) -> bool) -> usize {
        self.effects.iter().filter(|e| predicate(e)).count()
    }
}

impl Presenter for RecordingPresenter {
    fn show(&mut self, panel: &Panel) {
        self.panels.push(panel.clone());
    }

    fn effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

// =============================================================================
// TESTS
// =============================================================================
