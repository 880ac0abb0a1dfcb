//! Twenty48 eval crate - heuristics for board evaluation.

use twenty48_core::Board;

#[derive(Clone, Debug)]
pub struct EvalWeights {
    pub monotonicity: f64,
    pub smoothness: f64,
    pub empty_cells: f64,
    pub corner: f64,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            monotonicity: 1.0,
            smoothness: 0.1,
            empty_cells: 2.7,
            corner: 1.0,
        }
    }
}

/// Weighted heuristic score of a board snapshot. Pure: never mutates the
/// board and has no internal state.
pub fn evaluate(board: &Board, weights: &EvalWeights) -> f64 {
    let mut score = 0.0;

    score += monotonicity(board) * weights.monotonicity;
    score += smoothness(board) * weights.smoothness;
    score += board.empty_cell_count() as f64 * weights.empty_cells;
    score += corner_bonus(board) * weights.corner;

    score
}

/// Per row and per column, the longer of the non-decreasing and
/// non-increasing runs over adjacent present tiles, summed. Rewards lines
/// that look sorted.
pub fn monotonicity(board: &Board) -> f64 {
    let size = board.size();
    let mut score = 0.0;

    for row in 0..size {
        let mut increasing = 0;
        let mut decreasing = 0;
        for col in 0..size.saturating_sub(1) {
            if let (Some(current), Some(next)) = (board.get(row, col), board.get(row, col + 1)) {
                if current.value <= next.value {
                    increasing += 1;
                }
                if current.value >= next.value {
                    decreasing += 1;
                }
            }
        }
        score += increasing.max(decreasing) as f64;
    }

    for col in 0..size {
        let mut increasing = 0;
        let mut decreasing = 0;
        for row in 0..size.saturating_sub(1) {
            if let (Some(current), Some(next)) = (board.get(row, col), board.get(row + 1, col)) {
                if current.value <= next.value {
                    increasing += 1;
                }
                if current.value >= next.value {
                    decreasing += 1;
                }
            }
        }
        score += increasing.max(decreasing) as f64;
    }

    score
}

/// Negative sum of |log2(a) - log2(b)| over present right/down neighbor
/// pairs. Penalizes large value discontinuities.
pub fn smoothness(board: &Board) -> f64 {
    let size = board.size();
    let mut score = 0.0;

    for row in 0..size {
        for col in 0..size {
            let Some(tile) = board.get(row, col) else {
                continue;
            };
            let value = f64::from(tile.value).log2();

            if let Some(right) = board.get(row, col + 1) {
                score -= (value - f64::from(right.value).log2()).abs();
            }
            if let Some(down) = board.get(row + 1, col) {
                score -= (value - f64::from(down.value).log2()).abs();
            }
        }
    }

    score
}

/// The highest tile's value when it sits in any of the four corners,
/// otherwise zero.
pub fn corner_bonus(board: &Board) -> f64 {
    let size = board.size();
    let max_value = board.highest_tile();
    if max_value == 0 {
        return 0.0;
    }

    let corners = [
        (0, 0),
        (0, size - 1),
        (size - 1, 0),
        (size - 1, size - 1),
    ];
    let in_corner = corners
        .iter()
        .any(|&(r, c)| board.get(r, c).is_some_and(|t| t.value == max_value));

    if in_corner {
        f64::from(max_value)
    } else {
        0.0
    }
}

/// Count adjacent equal-value pairs (right and down neighbors). Used by the
/// advisor as "merge opportunities".
pub fn adjacent_equal_pairs(board: &Board) -> usize {
    let size = board.size();
    let mut count = 0;

    for row in 0..size {
        for col in 0..size {
            let Some(tile) = board.get(row, col) else {
                continue;
            };
            if board.get(row, col + 1).is_some_and(|t| t.value == tile.value) {
                count += 1;
            }
            if board.get(row + 1, col).is_some_and(|t| t.value == tile.value) {
                count += 1;
            }
        }
    }

    count
}
