//! # Fixed Primitives
//!
//! Hardcoded constants for the journey.
//!
//! The journey is built for one occasion: stage order, delays, allow-sets and
//! card sets are compiled into the binary and immutable at runtime.
//!
//! ## Delays
//!
//! All delays are logical milliseconds. The core never reads a wall clock;
//! the driver passes `now` into every call.

use crate::types::Millis;

// =============================================================================
// DELAYS
// =============================================================================

/// Exit animation window between two panels.
pub const TRANSITION_DELAY: Millis = Millis(400);

/// Gap between a success acknowledgement and the transition it triggers.
pub const SUCCESS_DELAY: Millis = Millis(800);

/// How long a rejected input stays flagged.
pub const FLAG_DURATION: Millis = Millis(600);

/// Shake window before the unlock burst fires.
pub const UNLOCK_DELAY: Millis = Millis(1000);

/// Delay before the Finish action is armed after the feedback form is sent.
pub const FINISH_ARM_DELAY: Millis = Millis(600);

// =============================================================================
// ALLOW-SETS
// =============================================================================

/// Accepted access codes (compared case-insensitively).
pub const PASSWORDS: [&str; 2] = ["kassy", "birthday"];

/// Any of these words contained in the reflection answer is accepted.
pub const JOYFUL_WORDS: [&str; 7] = [
    "special",
    "amazing",
    "wonderful",
    "great",
    "beautiful",
    "fantastic",
    "happy",
];

/// Minimum character count of a reflection before the word check runs.
pub const MIN_REFLECTION_CHARS: usize = 2;

/// Year code accepted regardless of the current calendar year.
pub const FALLBACK_YEAR: &str = "2025";

// =============================================================================
// PUZZLE
// =============================================================================

/// Letter values of the puzzle tokens, indexed by token identity.
pub const PUZZLE_LETTERS: [char; 5] = ['H', 'A', 'P', 'P', 'Y'];

/// The word the placed letters must spell.
pub const PUZZLE_TARGET: [char; 5] = ['H', 'A', 'P', 'P', 'Y'];

/// Jumbled display order of the tiles (token identities).
pub const PUZZLE_DISPLAY_ORDER: [u8; 5] = [3, 4, 0, 2, 1];

// =============================================================================
// CARD SETS
// =============================================================================

/// A selectable card: label plus a one-line caption.
pub type CardSpec = (&'static str, &'static str);

/// Memory selection cards.
pub const MEMORY_CARDS: [CardSpec; 3] = [
    ("Gifts", "The joy of giving and receiving"),
    ("Celebration", "Moments of pure happiness"),
    ("Love", "Surrounded by those who care"),
];

/// Gallery highlight cards.
pub const GALLERY_CARDS: [CardSpec; 3] = [
    ("Gifts", "The joy of surprises"),
    ("Celebration", "The heart of every birthday"),
    ("Cake", "Sweetest part of the day"),
];

// =============================================================================
// FEEDBACK
// =============================================================================

/// Storage key of the feedback record list.
pub const FEEDBACK_STORAGE_KEY: &str = "birthday_feedbacks_admin";

/// Passphrase guarding the message viewer unless configured otherwise.
pub const DEFAULT_ADMIN_KEY: &str = "ivankey123";

/// Minimum number of word-like tokens in a feedback message.
pub const MIN_MESSAGE_WORDS: usize = 3;

/// Minimum length of a single word-like token.
pub const MIN_WORD_LENGTH: usize = 2;

/// Placeholder stored for answers that were never given.
pub const MISSING_ANSWER: &str = "N/A";
