//! Random tile spawning.

use rand::Rng;
use twenty48_core::{Board, Tile};

/// Probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Place one new tile in a uniformly random empty cell: 2 with probability
/// 0.9, 4 with probability 0.1. Returns false (and does nothing) when the
/// board has no empty cell.
pub fn spawn_random_tile<R: Rng>(board: &mut Board, rng: &mut R) -> bool {
    let empties = board.empty_cells();
    if empties.is_empty() {
        return false;
    }

    let (row, col) = empties[rng.gen_range(0..empties.len())];
    let value = if rng.gen::<f64>() < FOUR_PROBABILITY {
        4
    } else {
        2
    };
    board.set(row, col, Some(Tile::new(value)));
    true
}
