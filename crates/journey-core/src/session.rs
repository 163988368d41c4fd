//! # Session Module
//!
//! The single mutable record of one journey.
//!
//! - Created once at startup: stage 0, no answers, locked, idle
//! - Owned by the [`crate::StageController`]; nothing else writes it
//! - Never persisted
//! - [`SessionState::reset`] reinitializes every field in place

use crate::primitives::PUZZLE_DISPLAY_ORDER;
use crate::puzzle::PuzzleBoard;
use crate::{Answer, InputField, Stage};
use std::collections::BTreeMap;

/// Progress through the journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) stage: Stage,
    pub(crate) answers: BTreeMap<Answer, String>,
    pub(crate) puzzle: PuzzleBoard,
    /// Tile ids in the order the puzzle panel lists them.
    pub(crate) tile_order: [u8; 5],
    pub(crate) locked: bool,
    pub(crate) transitioning: bool,
    /// Selected card on the memory or gallery panel.
    pub(crate) selected_card: Option<usize>,
    /// Input currently marked as erroneous.
    pub(crate) flagged: Option<InputField>,
    pub(crate) feedback_sent: bool,
    pub(crate) finish_ready: bool,
    /// Whether any panel has been shown yet (the first render skips the exit
    /// animation).
    pub(crate) has_panel: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            stage: Stage::Welcome,
            answers: BTreeMap::new(),
            puzzle: PuzzleBoard::new(),
            tile_order: PUZZLE_DISPLAY_ORDER,
            locked: true,
            transitioning: false,
            selected_card: None,
            flagged: None,
            feedback_sent: false,
            finish_ready: false,
            has_panel: false,
        }
    }
}

impl SessionState {
    /// Create a fresh session at the welcome stage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reinitialize every field to its start value.
    ///
    /// `has_panel` survives: the screen still shows whatever was last rendered.
    pub fn reset(&mut self) {
        let has_panel = self.has_panel;
        *self = Self {
            has_panel,
            ..Self::default()
        };
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn stage_index(&self) -> u8 {
        self.stage.index()
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// A collected answer, if given.
    #[must_use]
    pub fn answer(&self, key: Answer) -> Option<&str> {
        self.answers.get(&key).map(String::as_str)
    }

    /// All collected answers in key order.
    #[must_use]
    pub fn answers(&self) -> &BTreeMap<Answer, String> {
        &self.answers
    }

    #[must_use]
    pub fn puzzle(&self) -> &PuzzleBoard {
        &self.puzzle
    }

    /// Tile ids in the order the puzzle panel lists them.
    #[must_use]
    pub fn tile_order(&self) -> &[u8] {
        &self.tile_order
    }

    #[must_use]
    pub fn selected_card(&self) -> Option<usize> {
        self.selected_card
    }

    #[must_use]
    pub fn flagged(&self) -> Option<InputField> {
        self.flagged
    }

    #[must_use]
    pub fn feedback_sent(&self) -> bool {
        self.feedback_sent
    }

    #[must_use]
    pub fn finish_ready(&self) -> bool {
        self.finish_ready
    }

    /// Store a trimmed answer. Empty input removes the answer.
    pub(crate) fn record_answer(&mut self, key: Answer, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.answers.remove(&key);
        } else {
            self.answers.insert(key, value.to_string());
        }
    }

    /// Move to `stage`, dropping the per-panel state of the previous one.
    pub(crate) fn enter(&mut self, stage: Stage) {
        if self.stage != stage {
            self.selected_card = None;
            self.flagged = None;
            self.feedback_sent = false;
            self.finish_ready = false;
        }
        self.stage = stage;
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::TokenId;

    #[test]
    fn starts_locked_at_welcome() {
        let session = SessionState::new();
        assert_eq!(session.stage(), Stage::Welcome);
        assert!(session.is_locked());
        assert!(!session.is_transitioning());
        assert!(session.answers().is_empty());
        assert!(session.puzzle().is_empty());
    }

    #[test]
    fn record_answer_trims_and_removes_empty() {
        let mut session = SessionState::new();
        session.record_answer(Answer::Reflection, "  happy ");
        assert_eq!(session.answer(Answer::Reflection), Some("happy"));

        session.record_answer(Answer::Reflection, "   ");
        assert_eq!(session.answer(Answer::Reflection), None);
    }

    #[test]
    fn reset_restores_start_values() {
        let mut session = SessionState::new();
        session.enter(Stage::FinalReveal);
        session.record_answer(Answer::Memory, "Love");
        session.puzzle.place(TokenId(0));
        session.tile_order.reverse();
        session.locked = false;
        session.transitioning = true;
        session.has_panel = true;

        session.reset();

        assert_eq!(session.stage(), Stage::Welcome);
        assert!(session.is_locked());
        assert!(!session.is_transitioning());
        assert!(session.answers().is_empty());
        assert!(session.puzzle().is_empty());
        assert_eq!(session.tile_order(), &PUZZLE_DISPLAY_ORDER);
        assert!(session.has_panel);
    }

    #[test]
    fn entering_a_new_stage_drops_panel_state() {
        let mut session = SessionState::new();
        session.enter(Stage::Memory);
        session.selected_card = Some(1);
        session.flagged = Some(InputField::Password);

        session.enter(Stage::Memory);
        assert_eq!(session.selected_card(), Some(1));

        session.enter(Stage::Puzzle);
        assert_eq!(session.selected_card(), None);
        assert_eq!(session.flagged(), None);
    }
}
