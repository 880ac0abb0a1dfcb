//! Tile type - a power-of-two value plus a per-move merge flag.

use serde::{Deserialize, Serialize};

/// A single tile on the board.
///
/// `merged` is transient: it marks a tile that was produced by a merge
/// during the current move, so it cannot merge a second time. The board
/// clears every flag at the start of the next move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Tile {
    pub value: u32,
    pub merged: bool,
}

impl Tile {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            merged: false,
        }
    }

    /// Double the value in place (the surviving tile of a merge).
    pub fn double(&mut self) {
        self.value *= 2;
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
