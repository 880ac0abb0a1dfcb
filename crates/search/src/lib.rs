//! Twenty48 search crate - depth-limited expectimax move search.
//!
//! MAX nodes pick the best of the four directions, CHANCE nodes average
//! over every possible tile spawn. The tree is explored exhaustively on
//! independent board clones; only the four root branches run in parallel.

mod expectimax;
mod rationale;

pub use expectimax::{Expectimax, MoveEvaluation, DEFAULT_DEPTH, DEFAULT_TOP_MOVES};

use twenty48_core::{Board, Direction};

/// Apply a move to a clone of `board`. Returns the resulting board, or
/// `None` when the move would not change anything.
pub fn apply_move(board: &Board, direction: Direction) -> Option<Board> {
    let mut next = board.clone();
    if next.shift(direction) {
        Some(next)
    } else {
        None
    }
}
