//! # Timeline
//!
//! Scheduled continuations, ordered by logical due time.
//!
//! Ties are broken by scheduling order, so replaying the same actions at the
//! same instants always runs continuations in the same order.

use crate::{InputField, Millis, Stage};
use std::collections::BTreeMap;

/// A deferred step of the stage machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Second phase of a transition: swap in the target stage.
    CompleteTransition(Stage),
    /// Advance once the success acknowledgement has been on screen.
    AdvanceAfterSuccess(Stage),
    /// Remove the error mark from an input.
    ClearFlag(InputField),
    /// Confetti and move on to the final reveal.
    UnlockBurst,
    /// Arm the Finish action.
    ArmFinish,
}

/// Pending continuations keyed by `(due, sequence)`.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pending: BTreeMap<(Millis, u64), Continuation>,
    sequence: u64,
}

impl Timeline {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `continuation` to run at `due`.
    pub fn schedule(&mut self, due: Millis, continuation: Continuation) {
        self.pending.insert((due, self.sequence), continuation);
        self.sequence = self.sequence.saturating_add(1);
    }

    /// Remove and return the earliest continuation due at or before `now`.
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, Continuation)> {
        let (&(due, _), _) = self.pending.first_key_value()?;
        if due > now {
            return None;
        }
        self.pending
            .pop_first()
            .map(|((due, _), continuation)| (due, continuation))
    }

    /// Due time of the earliest pending continuation.
    #[must_use]
    pub fn next_due(&self) -> Option<Millis> {
        self.pending.keys().next().map(|&(due, _)| due)
    }

    /// Drop every pending continuation.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
