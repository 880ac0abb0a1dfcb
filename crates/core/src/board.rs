//! Board representation - a row-major grid of optional tiles.
//!
//! All four moves reduce to one leftward line-merge routine: RIGHT reverses
//! each row around it, UP transposes around it, DOWN does both. Copies are
//! deep by construction (tiles are plain values), so search can explore
//! hypothetical futures without touching the live board.

use crate::{Direction, Tile};
use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Tile>>,
    score: u32,
    has_won: bool,
    last_move_score: u32,
}

impl Board {
    pub const DEFAULT_SIZE: usize = 5;
    pub const WIN_VALUE: u32 = 2048;

    pub fn new() -> Self {
        Self::with_size(Self::DEFAULT_SIZE)
    }

    pub fn with_size(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            score: 0,
            has_won: false,
            last_move_score: 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Running score accumulated from merges.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Merge points earned by the most recent `shift`.
    pub fn last_move_score(&self) -> u32 {
        self.last_move_score
    }

    /// True once any merge has produced a `WIN_VALUE` tile. Latches for the
    /// lifetime of the board.
    pub fn has_won(&self) -> bool {
        self.has_won
    }

    /// Tile at `(row, col)`, or `None` when the cell is empty or the
    /// coordinates are out of range. Out-of-range access is not an error:
    /// the evaluator and search probe one-past-edge neighbors generically.
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col]
        } else {
            None
        }
    }

    /// Overwrite a cell. No-op when out of range. Gameplay never calls this;
    /// it exists so chance nodes can synthesize tile spawns on clones.
    pub fn set(&mut self, row: usize, col: usize, tile: Option<Tile>) {
        if row < self.size && col < self.size {
            self.cells[row * self.size + col] = tile;
        }
    }

    pub fn highest_tile(&self) -> u32 {
        self.cells
            .iter()
            .flatten()
            .map(|t| t.value)
            .max()
            .unwrap_or(0)
    }

    pub fn empty_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Coordinates of every empty cell, row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut empties = Vec::with_capacity(self.empty_cell_count());
        for row in 0..self.size {
            for col in 0..self.size {
                if self.get(row, col).is_none() {
                    empties.push((row, col));
                }
            }
        }
        empties
    }

    /// Apply a move. Returns whether any cell changed position or value.
    /// A move that changes nothing leaves score and flags untouched.
    pub fn shift(&mut self, direction: Direction) -> bool {
        self.clear_merged_flags();
        self.last_move_score = 0;

        match direction {
            Direction::Left => self.shift_rows_left(),
            Direction::Right => {
                self.reverse_rows();
                let changed = self.shift_rows_left();
                self.reverse_rows();
                changed
            }
            Direction::Up => {
                self.transpose();
                let changed = self.shift_rows_left();
                self.transpose();
                changed
            }
            Direction::Down => {
                self.transpose();
                self.reverse_rows();
                let changed = self.shift_rows_left();
                self.reverse_rows();
                self.transpose();
                changed
            }
        }
    }

    /// A transposed deep copy (rows become columns). Score and flags carry
    /// over unchanged.
    pub fn transposed(&self) -> Board {
        let mut copy = self.clone();
        copy.transpose();
        copy
    }

    /// True iff no empty cell exists and no two adjacent cells share a
    /// value, i.e. no direction could change the board.
    pub fn is_game_over(&self) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                let Some(tile) = self.get(row, col) else {
                    return false;
                };
                if let Some(right) = self.get(row, col + 1) {
                    if right.value == tile.value {
                        return false;
                    }
                }
                if let Some(down) = self.get(row + 1, col) {
                    if down.value == tile.value {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Would a move in `direction` change the board? Simulated on a clone.
    pub fn can_shift(&self, direction: Direction) -> bool {
        self.clone().shift(direction)
    }

    fn clear_merged_flags(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            cell.merged = false;
        }
    }

    fn shift_rows_left(&mut self) -> bool {
        let mut changed = false;
        for row in 0..self.size {
            let start = row * self.size;
            let outcome = merge_line(&mut self.cells[start..start + self.size]);
            changed |= outcome.changed;
            self.score += outcome.gained;
            self.last_move_score += outcome.gained;
            if outcome.best_merge >= Self::WIN_VALUE {
                self.has_won = true;
            }
        }
        changed
    }

    fn reverse_rows(&mut self) {
        for row in 0..self.size {
            let start = row * self.size;
            self.cells[start..start + self.size].reverse();
        }
    }

    fn transpose(&mut self) {
        for row in 0..self.size {
            for col in (row + 1)..self.size {
                self.cells.swap(row * self.size + col, col * self.size + row);
            }
        }
    }
}

struct LineOutcome {
    gained: u32,
    best_merge: u32,
    changed: bool,
}

/// Collapse one line toward index 0: compact preserving order, merge each
/// adjacent equal unmerged pair once in a single scan from the leading
/// edge, compact again.
fn merge_line(line: &mut [Option<Tile>]) -> LineOutcome {
    let mut changed = compact(line);
    let mut gained = 0;
    let mut best_merge = 0;

    for i in 0..line.len().saturating_sub(1) {
        let (Some(left), Some(right)) = (line[i], line[i + 1]) else {
            continue;
        };
        if left.value == right.value && !left.merged && !right.merged {
            let mut survivor = left;
            survivor.double();
            survivor.merged = true;
            line[i] = Some(survivor);
            line[i + 1] = None;
            gained += survivor.value;
            best_merge = best_merge.max(survivor.value);
            changed = true;
        }
    }

    if gained > 0 {
        compact(line);
    }
    LineOutcome {
        gained,
        best_merge,
        changed,
    }
}

/// Stable compaction: move every tile toward index 0 preserving order.
/// Returns whether any tile moved.
fn compact(line: &mut [Option<Tile>]) -> bool {
    let mut moved = false;
    let mut write = 0;
    for read in 0..line.len() {
        if line[read].is_some() {
            if write != read {
                line[write] = line[read].take();
                moved = true;
            }
            write += 1;
        }
    }
    moved
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                match self.get(row, col) {
                    Some(tile) => write!(f, "{:>6}", tile.value)?,
                    None => write!(f, "{:>6}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a board from rows of values; 0 means empty.
    fn board_from(rows: &[&[u32]]) -> Board {
        let size = rows.len();
        let mut board = Board::with_size(size);
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value != 0 {
                    board.set(r, c, Some(Tile::new(value)));
                }
            }
        }
        board
    }

    fn values(board: &Board) -> Vec<Vec<u32>> {
        (0..board.size())
            .map(|r| {
                (0..board.size())
                    .map(|c| board.get(r, c).map_or(0, |t| t.value))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_compact_preserves_order() {
        let mut left = board_from(&[&[0, 2, 0, 4], &[0; 4], &[0; 4], &[0; 4]]);
        assert!(left.shift(Direction::Left));
        assert_eq!(values(&left)[0], vec![2, 4, 0, 0]);

        let mut right = board_from(&[&[0, 2, 0, 4], &[0; 4], &[0; 4], &[0; 4]]);
        assert!(right.shift(Direction::Right));
        assert_eq!(values(&right)[0], vec![0, 0, 2, 4]);
    }

    #[test]
    fn test_single_merge_per_move() {
        // [2,2,2,0] left -> [4,2,0,0], never [4,4,0,0] or [8,0,0,0]
        let mut board = board_from(&[&[2, 2, 2, 0], &[0; 4], &[0; 4], &[0; 4]]);
        assert!(board.shift(Direction::Left));
        assert_eq!(values(&board)[0], vec![4, 2, 0, 0]);
        assert_eq!(board.score(), 4);
    }

    #[test]
    fn test_no_chain_merge_of_four() {
        let mut board = board_from(&[&[2, 2, 2, 2], &[0; 4], &[0; 4], &[0; 4]]);
        assert!(board.shift(Direction::Left));
        assert_eq!(values(&board)[0], vec![4, 4, 0, 0]);
        assert_eq!(board.score(), 8);
    }

    #[test]
    fn test_two_independent_merges_score() {
        let mut board = board_from(&[&[2, 2, 4, 4], &[0; 4], &[0; 4], &[0; 4]]);
        assert!(board.shift(Direction::Left));
        assert_eq!(values(&board)[0], vec![4, 8, 0, 0]);
        assert_eq!(board.score(), 12);
        assert_eq!(board.last_move_score(), 12);
    }

    #[test]
    fn test_merged_flags_reset_between_moves() {
        // The 4 produced by the first move must merge with another 4 on the
        // next move: the flag only blocks merges within one move.
        let mut board = board_from(&[&[2, 2, 4, 0], &[0; 4], &[0; 4], &[0; 4]]);
        assert!(board.shift(Direction::Left));
        assert_eq!(values(&board)[0], vec![4, 4, 0, 0]);
        assert!(board.shift(Direction::Left));
        assert_eq!(values(&board)[0], vec![8, 0, 0, 0]);
        assert_eq!(board.score(), 4 + 8);
    }

    #[test]
    fn test_shift_no_change_returns_false() {
        let mut board = board_from(&[&[2, 0, 0, 0], &[4, 0, 0, 0], &[0; 4], &[0; 4]]);
        let before = values(&board);
        assert!(!board.shift(Direction::Left));
        assert_eq!(values(&board), before);
        assert_eq!(board.last_move_score(), 0);
    }

    #[test]
    fn test_up_equals_transpose_left_transpose() {
        let mut direct = board_from(&[
            &[2, 0, 2, 8],
            &[2, 4, 0, 8],
            &[0, 4, 2, 8],
            &[0, 0, 0, 8],
        ]);
        let mut via_transpose = direct.transposed();

        let changed_direct = direct.shift(Direction::Up);
        let changed_via = via_transpose.shift(Direction::Left);
        let via_transpose = via_transpose.transposed();

        assert_eq!(changed_direct, changed_via);
        assert_eq!(values(&direct), values(&via_transpose));
        assert_eq!(direct.score(), via_transpose.score());
    }

    #[test]
    fn test_shift_down_merges_toward_bottom() {
        let mut board = board_from(&[&[2, 0, 0, 0], &[2, 0, 0, 0], &[4, 0, 0, 0], &[0; 4]]);
        assert!(board.shift(Direction::Down));
        let grid = values(&board);
        assert_eq!(grid[3][0], 4);
        assert_eq!(grid[2][0], 4);
        assert_eq!(grid[1][0], 0);
        assert_eq!(board.score(), 4);
    }

    #[test]
    fn test_game_over_detection() {
        let full = board_from(&[&[2, 4, 2, 4], &[4, 2, 4, 2], &[2, 4, 2, 4], &[4, 2, 4, 2]]);
        assert!(full.is_game_over());

        let mut with_hole = full.clone();
        with_hole.set(2, 2, None);
        assert!(!with_hole.is_game_over());

        let mergeable = board_from(&[&[2, 2, 4, 8], &[4, 8, 16, 32], &[8, 16, 32, 64], &[16, 32, 64, 128]]);
        assert!(!mergeable.is_game_over());
    }

    #[test]
    fn test_win_latch() {
        let mut board = board_from(&[&[1024, 1024, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        assert!(!board.has_won());
        assert!(board.shift(Direction::Left));
        assert!(board.has_won());

        // Stays latched through later non-winning moves.
        board.set(1, 0, Some(Tile::new(2)));
        board.set(1, 1, Some(Tile::new(2)));
        assert!(board.shift(Direction::Left));
        assert!(board.has_won());
    }

    #[test]
    fn test_spawned_win_tile_does_not_latch() {
        // Only merges latch the flag, matching the original rules.
        let mut board = Board::with_size(4);
        board.set(0, 0, Some(Tile::new(2048)));
        assert!(!board.has_won());
    }

    #[test]
    fn test_clone_isolation() {
        let mut original = board_from(&[&[2, 2, 0, 0], &[0; 4], &[0; 4], &[0; 4]]);
        let mut copy = original.clone();
        assert!(copy.shift(Direction::Left));
        copy.set(3, 3, Some(Tile::new(64)));

        assert_eq!(values(&original)[0], vec![2, 2, 0, 0]);
        assert_eq!(original.score(), 0);
        assert!(original.get(3, 3).is_none());

        original.shift(Direction::Right);
        assert_eq!(copy.get(0, 0).map(|t| t.value), Some(4));
    }

    #[test]
    fn test_out_of_range_access() {
        let mut board = Board::with_size(4);
        assert!(board.get(4, 0).is_none());
        assert!(board.get(0, 17).is_none());
        board.set(9, 9, Some(Tile::new(2)));
        assert_eq!(board.empty_cell_count(), 16);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::with_size(3);
        board.set(0, 0, Some(Tile::new(2)));
        board.set(1, 1, Some(Tile::new(4)));
        let empties = board.empty_cells();
        assert_eq!(empties.len(), 7);
        assert_eq!(empties[0], (0, 1));
        assert!(!empties.contains(&(1, 1)));
    }

    #[test]
    fn test_highest_tile() {
        let board = board_from(&[&[2, 0, 128, 4], &[0; 4], &[0, 64, 0, 0], &[0; 4]]);
        assert_eq!(board.highest_tile(), 128);
        assert_eq!(Board::with_size(4).highest_tile(), 0);
    }

    #[test]
    fn test_display_renders_grid() {
        let board = board_from(&[&[2, 0], &[0, 4]]);
        let text = board.to_string();
        assert!(text.contains('2'));
        assert!(text.contains('4'));
        assert!(text.contains('.'));
    }
}
