//! # Letter Puzzle
//!
//! Five tiles (`H`, `A`, `P`, `P`, `Y`) placed one by one into five slots.
//!
//! The two `P` tiles are distinct tokens: identity decides whether a tile is
//! already used, the letter value decides whether the word is right.

use crate::primitives::PUZZLE_LETTERS;
use serde::{Deserialize, Serialize};

/// Stable identity of a puzzle tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId(pub u8);

/// One placeable letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleToken {
    pub id: TokenId,
    pub letter: char,
}

impl PuzzleToken {
    /// Look up one of the fixed tiles.
    #[must_use]
    pub fn by_id(id: TokenId) -> Option<PuzzleToken> {
        PUZZLE_LETTERS
            .get(usize::from(id.0))
            .map(|&letter| PuzzleToken { id, letter })
    }

    /// The tiles named by `ids`, in that order. Unknown ids are skipped.
    pub fn in_order(ids: &[u8]) -> impl Iterator<Item = PuzzleToken> + '_ {
        ids.iter()
            .filter_map(|&id| PuzzleToken::by_id(TokenId(id)))
    }
}

/// The placed tiles, in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PuzzleBoard {
    placed: Vec<PuzzleToken>,
}

impl PuzzleBoard {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots on the board.
    #[must_use]
    pub fn capacity() -> usize {
        PUZZLE_LETTERS.len()
    }

    /// Place a tile. Returns `false` (and leaves the board untouched) when the
    /// tile is unknown, already placed, or the board is full.
    pub fn place(&mut self, id: TokenId) -> bool {
        let Some(token) = PuzzleToken::by_id(id) else {
            return false;
        };
        if self.is_used(id) || self.is_full() {
            return false;
        }
        self.placed.push(token);
        true
    }

    /// Remove every placed tile.
    pub fn clear(&mut self) {
        self.placed.clear();
    }

    /// Whether the tile with this identity is on the board.
    #[must_use]
    pub fn is_used(&self, id: TokenId) -> bool {
        self.placed.iter().any(|t| t.id == id)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.placed.len() >= Self::capacity()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.placed.len()
    }

    /// Placed tiles in order.
    #[must_use]
    pub fn tokens(&self) -> &[PuzzleToken] {
        &self.placed
    }

    /// Slot contents, `None` for empty slots.
    #[must_use]
    pub fn slots(&self) -> Vec<Option<char>> {
        (0..Self::capacity())
            .map(|i| self.placed.get(i).map(|t| t.letter))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_p_tiles_have_distinct_identities() {
        let p1 = PuzzleToken::by_id(TokenId(2)).expect("tile");
        let p2 = PuzzleToken::by_id(TokenId(3)).expect("tile");
        assert_eq!(p1.letter, p2.letter);
        assert_ne!(p1.id, p2.id);
    }

    #[test]
    fn placing_same_identity_twice_is_refused() {
        let mut board = PuzzleBoard::new();
        assert!(board.place(TokenId(2)));
        assert!(!board.place(TokenId(2)));
        assert!(board.place(TokenId(3)));
        assert_eq!(board.slots()[..2], [Some('P'), Some('P')]);
    }

    #[test]
    fn unknown_tile_is_refused() {
        let mut board = PuzzleBoard::new();
        assert!(!board.place(TokenId(9)));
        assert!(board.is_empty());
    }

    #[test]
    fn board_never_exceeds_capacity() {
        let mut board = PuzzleBoard::new();
        for id in 0..5 {
            assert!(board.place(TokenId(id)));
        }
        assert!(board.is_full());
        assert_eq!(board.len(), PuzzleBoard::capacity());
    }

    #[test]
    fn slots_pad_with_empty() {
        let mut board = PuzzleBoard::new();
        board.place(TokenId(0));
        assert_eq!(board.slots(), vec![Some('H'), None, None, None, None]);
        board.clear();
        assert!(board.slots().iter().all(Option::is_none));
    }

    #[test]
    fn fixed_order_shows_every_tile_once() {
        let ids: Vec<u8> = PuzzleToken::in_order(&crate::primitives::PUZZLE_DISPLAY_ORDER)
            .map(|t| t.id.0)
            .collect();
        assert_eq!(ids.len(), 5);
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn in_order_skips_unknown_ids() {
        let letters: Vec<char> = PuzzleToken::in_order(&[4, 9, 0])
            .map(|t| t.letter)
            .collect();
        assert_eq!(letters, vec!['Y', 'H']);
    }
}
