//! # Feedback Module
//!
//! The final reveal's name + message form and the records it produces.
//!
//! - `FeedbackForm::validate` checks the form before anything is stored
//! - `FeedbackRecord` is the JSON-shaped entry appended to the store
//! - Storage and export live in the submodules; file I/O is the app's job

mod export;
mod store;

pub use export::{MAX_STORE_BYTES, export_text, newest_first, records_from_json, records_to_json};
pub use store::{FeedbackStore, MemoryFeedbackStore};

use crate::primitives::{MIN_MESSAGE_WORDS, MIN_WORD_LENGTH, MISSING_ANSWER};
use crate::session::SessionState;
use crate::{Answer, Rejection};
use serde::{Deserialize, Serialize};

/// A validated name + message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackForm {
    pub name: String,
    pub message: String,
}

impl FeedbackForm {
    /// Validate and trim the raw form values.
    ///
    /// - name: non-empty, ASCII letters, whitespace, `'` and `-` only
    /// - message: non-empty, at least three word-like tokens
    pub fn validate(name: &str, message: &str) -> Result<Self, Rejection> {
        let name = name.trim();
        let message = message.trim();

        if name.is_empty() {
            return Err(Rejection::MissingName);
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || c == '\'' || c == '-')
        {
            return Err(Rejection::InvalidName);
        }
        if message.is_empty() {
            return Err(Rejection::MissingMessage);
        }
        if word_count(message) < MIN_MESSAGE_WORDS {
            return Err(Rejection::TooFewWords);
        }

        Ok(Self {
            name: name.to_string(),
            message: message.to_string(),
        })
    }
}

/// Count tokens made only of ASCII letters, at least two long.
fn word_count(message: &str) -> usize {
    message
        .split_whitespace()
        .filter(|w| w.len() >= MIN_WORD_LENGTH && w.chars().all(|c| c.is_ascii_alphabetic()))
        .count()
}

/// One stored feedback entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub name: String,
    pub message: String,
    pub quiz_answer: String,
    pub memory_choice: String,
    pub gallery_choice: String,
    pub time: String,
}

impl FeedbackRecord {
    /// Combine a validated form with the answers collected so far.
    #[must_use]
    pub fn from_session(form: FeedbackForm, session: &SessionState, time: String) -> Self {
        let answer = |key| {
            session
                .answer(key)
                .unwrap_or(MISSING_ANSWER)
                .to_string()
        };
        Self {
            name: form.name,
            message: form.message,
            quiz_answer: answer(Answer::Reflection),
            memory_choice: answer(Answer::Memory),
            gallery_choice: answer(Answer::Gallery),
            time,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
