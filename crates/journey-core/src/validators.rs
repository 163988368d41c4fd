//! # Validators
//!
//! Per-stage acceptance rules.
//!
//! - Pure functions over the latest input value
//! - No state is read or written here
//! - Inputs are trimmed before comparison

use crate::Rejection;
use crate::primitives::{FALLBACK_YEAR, JOYFUL_WORDS, MIN_REFLECTION_CHARS, PASSWORDS, PUZZLE_TARGET};
use crate::puzzle::PuzzleToken;

/// The Validator gates advancement out of each challenge stage.
pub struct Validator;

impl Validator {
    /// Access code: case-insensitive match against the allow-set.
    pub fn password(input: &str) -> Result<(), Rejection> {
        let guess = input.trim().to_lowercase();
        if PASSWORDS.contains(&guess.as_str()) {
            Ok(())
        } else {
            Err(Rejection::WrongPassword)
        }
    }

    /// Reflection: the answer must contain one of the joyful words.
    ///
    /// Containment is a plain substring check; "unhappy" passes.
    pub fn reflection(input: &str) -> Result<(), Rejection> {
        let answer = input.trim().to_lowercase();

        if answer.chars().count() < MIN_REFLECTION_CHARS {
            return Err(Rejection::ReflectionTooShort);
        }

        if JOYFUL_WORDS.iter().any(|w| answer.contains(w)) {
            Ok(())
        } else {
            Err(Rejection::NotJoyful)
        }
    }

    /// Puzzle: the placed letters must spell the target, position by position.
    ///
    /// Only letter values are compared; which `P` tile sits where is irrelevant.
    pub fn puzzle(placed: &[PuzzleToken]) -> Result<(), Rejection> {
        let spelled = placed.len() == PUZZLE_TARGET.len()
            && placed
                .iter()
                .zip(PUZZLE_TARGET.iter())
                .all(|(token, &letter)| token.letter == letter);

        if spelled {
            Ok(())
        } else {
            Err(Rejection::PuzzleMismatch)
        }
    }

    /// Year code: the current year or the fixed fallback.
    pub fn secret_code(input: &str, current_year: i32) -> Result<(), Rejection> {
        let code = input.trim();
        if code == current_year.to_string() || code == FALLBACK_YEAR {
            Ok(())
        } else {
            Err(Rejection::WrongYear)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
