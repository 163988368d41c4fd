//! # Stages
//!
//! The fixed twelve-step sequence of the journey.
//!
//! ## Stage Definitions
//!
//! | Index | Stage | Gate |
//! |-------|-------|------|
//! | 0 | Welcome | Continue |
//! | 1 | Password | access code |
//! | 2 | AccessGranted | Continue |
//! | 3 | Reflection | joyful word |
//! | 4 | Memory | card selection |
//! | 5 | Puzzle | spell HAPPY |
//! | 6 | Gallery | card selection |
//! | 7 | SecretCode | current year |
//! | 8 | AlmostThere | Continue |
//! | 9 | Unlock | unlock burst |
//! | 10 | FinalReveal | feedback form + Finish |
//! | 11 | Complete | Restart |

use serde::{Deserialize, Serialize};

/// Number of stages in the journey.
pub const STAGE_COUNT: usize = 12;

// =============================================================================
// STAGE ENUM
// =============================================================================

/// One screen of the journey, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stage {
    Welcome,
    Password,
    AccessGranted,
    Reflection,
    Memory,
    Puzzle,
    Gallery,
    SecretCode,
    AlmostThere,
    Unlock,
    FinalReveal,
    Complete,
}

impl Stage {
    /// All stages in order.
    pub const ALL: [Stage; STAGE_COUNT] = [
        Stage::Welcome,
        Stage::Password,
        Stage::AccessGranted,
        Stage::Reflection,
        Stage::Memory,
        Stage::Puzzle,
        Stage::Gallery,
        Stage::SecretCode,
        Stage::AlmostThere,
        Stage::Unlock,
        Stage::FinalReveal,
        Stage::Complete,
    ];

    /// Get the stage name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Welcome => "Welcome",
            Stage::Password => "Access Code",
            Stage::AccessGranted => "Access Granted",
            Stage::Reflection => "Reflection",
            Stage::Memory => "Choose a Memory",
            Stage::Puzzle => "Word Puzzle",
            Stage::Gallery => "Gallery",
            Stage::SecretCode => "Time Code",
            Stage::AlmostThere => "Almost There",
            Stage::Unlock => "Unlock",
            Stage::FinalReveal => "Final Reveal",
            Stage::Complete => "Experience Complete",
        }
    }

    /// Zero-based position in the sequence.
    #[must_use]
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Look up a stage by index. `None` for anything outside 0..=11.
    #[must_use]
    pub fn from_index(index: u8) -> Option<Stage> {
        Stage::ALL.get(usize::from(index)).copied()
    }

    /// Get the next stage, if any.
    #[must_use]
    pub fn next(&self) -> Option<Stage> {
        Stage::from_index(self.index().saturating_add(1))
    }

    /// Check if this stage is terminal (Complete).
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Stage::Complete)
    }

    /// Progress bar value shown on the milestone panels.
    #[must_use]
    pub fn progress_percent(&self) -> Option<u8> {
        match self {
            Stage::AccessGranted => Some(25),
            Stage::Gallery => Some(50),
            Stage::AlmostThere => Some(90),
            _ => None,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.index(), self.name())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_ordering() {
        assert!(Stage::Welcome < Stage::Password);
        assert!(Stage::Puzzle < Stage::Gallery);
        assert!(Stage::FinalReveal < Stage::Complete);
    }

    #[test]
    fn index_round_trips_for_every_stage() {
        for (i, stage) in Stage::ALL.iter().enumerate() {
            assert_eq!(usize::from(stage.index()), i);
            assert_eq!(Stage::from_index(stage.index()), Some(*stage));
        }
    }

    #[test]
    fn out_of_range_index_has_no_stage() {
        assert_eq!(Stage::from_index(12), None);
        assert_eq!(Stage::from_index(u8::MAX), None);
    }

    #[test]
    fn next_walks_the_sequence() {
        assert_eq!(Stage::Welcome.next(), Some(Stage::Password));
        assert_eq!(Stage::FinalReveal.next(), Some(Stage::Complete));
        assert_eq!(Stage::Complete.next(), None);
        assert!(Stage::Complete.is_terminal());
    }

    #[test]
    fn stage_display() {
        assert_eq!(format!("{}", Stage::Welcome), "0: Welcome");
        assert_eq!(format!("{}", Stage::Complete), "11: Experience Complete");
    }
}
