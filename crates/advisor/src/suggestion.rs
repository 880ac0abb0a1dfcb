//! Suggestion formatting over expectimax results, plus the simple
//! merge-targeting fallback advisor.

use rand::Rng;
use twenty48_core::{Board, Direction};
use twenty48_search::{apply_move, Expectimax, MoveEvaluation, DEFAULT_TOP_MOVES};

const RANK_LABELS: [&str; 3] = ["BEST", "GOOD", "OKAY"];
const GAME_OVER_TEXT: &str = "No valid moves available!\nGame over";

/// Score gap above which the best move is called clearly superior.
const CLEAR_GAP: f64 = 500.0;
/// Score gap above which the best move is still singled out.
const RECOMMEND_GAP: f64 = 200.0;

/// Thin facade over [`Expectimax`] producing display-ready text.
pub struct Advisor {
    search: Expectimax,
}

impl Advisor {
    pub fn new() -> Self {
        Self {
            search: Expectimax::new(),
        }
    }

    pub fn with_search(search: Expectimax) -> Self {
        Self { search }
    }

    pub fn best_move(&self, board: &Board) -> Option<Direction> {
        self.search.best_move(board)
    }

    pub fn top_moves(&self, board: &Board) -> Vec<MoveEvaluation> {
        self.search.top_moves(board, DEFAULT_TOP_MOVES)
    }

    /// Multi-line report of the top ranked moves with scores, rationale,
    /// and a closing hint about how decisive the ranking is.
    pub fn formatted_suggestion(&self, board: &Board) -> String {
        let top = self.top_moves(board);
        if top.is_empty() {
            return GAME_OVER_TEXT.to_string();
        }

        let mut out = String::from("TOP MOVES\n");
        for (rank, eval) in top.iter().enumerate() {
            out.push_str(&format!(
                "{}: {} {} ({:.1})\n  - {}\n",
                RANK_LABELS[rank],
                eval.direction,
                eval.direction.arrow(),
                eval.score,
                eval.rationale
            ));
        }

        if top.len() >= 2 {
            let gap = top[0].score - top[1].score;
            let hint = if gap > CLEAR_GAP {
                "Best move is clearly superior"
            } else if gap > RECOMMEND_GAP {
                "Best move is recommended"
            } else {
                "Multiple good options available"
            };
            out.push_str(hint);
        }

        out
    }

    /// One-line best-move suggestion.
    pub fn suggestion_message(&self, board: &Board) -> String {
        match self.best_move(board) {
            Some(direction) => {
                format!("Suggestion: move {} {}", direction, direction.arrow())
            }
            None => GAME_OVER_TEXT.to_string(),
        }
    }

    /// Arrow-joined rendering of a simulated best-move sequence. The
    /// simulation spawns tiles from the caller's RNG, so the path is only
    /// reproducible under a fixed seed.
    pub fn strategy_path<R: Rng>(&self, board: &Board, num_moves: usize, rng: &mut R) -> String {
        let sequence = self.search.best_move_sequence(board, num_moves, rng);
        if sequence.is_empty() {
            return GAME_OVER_TEXT.to_string();
        }

        let path: Vec<String> = sequence.iter().map(|d| d.to_string()).collect();
        let mut out = format!("Strategy path: {}", path.join(" → "));
        if sequence.len() < num_moves {
            out.push_str("\nSequence ended early.");
        }
        out
    }

    /// Quick heuristic fallback: prefer a direction whose move mints a new
    /// tile equal to the current highest value (its occurrence count goes
    /// up), otherwise any direction that changes the board.
    pub fn merge_target_move(&self, board: &Board) -> Option<Direction> {
        let target = board.highest_tile();
        if target == 0 {
            return None;
        }

        let count_before = count_value(board, target);
        let mut fallback = None;
        for direction in Direction::ALL {
            if let Some(next) = apply_move(board, direction) {
                if count_value(&next, target) > count_before {
                    return Some(direction);
                }
                if fallback.is_none() {
                    fallback = Some(direction);
                }
            }
        }
        fallback
    }
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new()
    }
}

fn count_value(board: &Board, value: u32) -> usize {
    let mut count = 0;
    for row in 0..board.size() {
        for col in 0..board.size() {
            if board.get(row, col).is_some_and(|t| t.value == value) {
                count += 1;
            }
        }
    }
    count
}
