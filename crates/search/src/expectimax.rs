use std::cmp::Ordering;

use rand::Rng;
use rayon::prelude::*;
use twenty48_core::{Board, Direction, Tile};
use twenty48_engine::spawn_random_tile;
use twenty48_eval::{evaluate, EvalWeights};

use crate::apply_move;
use crate::rationale;

/// Default search depth in plies.
pub const DEFAULT_DEPTH: usize = 3;
/// Default number of ranked moves returned by `top_moves`.
pub const DEFAULT_TOP_MOVES: usize = 3;

/// One ranked root move: direction, expectimax score, and the qualitative
/// reasons behind it. Ephemeral - produced fresh per advisor query.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveEvaluation {
    pub direction: Direction,
    pub score: f64,
    pub rationale: String,
}

/// Depth-limited expectimax over board clones.
///
/// The recursion alternates MAX nodes (player picks a direction) and CHANCE
/// nodes (environment spawns a 2 or a 4 in an empty cell). There is no
/// pruning and no memoization; every node works on its own deep copy, so
/// the four root branches can run in parallel without locking.
pub struct Expectimax {
    pub depth: usize,
    pub weights: EvalWeights,
}

#[derive(Clone, Copy)]
enum Node {
    Max,
    Chance,
}

impl Expectimax {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    pub fn with_depth(depth: usize) -> Self {
        Self {
            depth: depth.max(1),
            weights: EvalWeights::default(),
        }
    }

    /// The direction with the highest expectimax score among those that
    /// change the board, or `None` when no direction does (game over).
    /// Deterministic for a fixed board: ties go to the earliest direction
    /// in Up/Down/Left/Right order.
    pub fn best_move(&self, board: &Board) -> Option<Direction> {
        let mut best: Option<(Direction, f64)> = None;
        for (direction, score) in self.root_scores(board) {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((direction, score)),
            }
        }
        best.map(|(direction, _)| direction)
    }

    /// Up to `k` root moves sorted by descending score, each annotated with
    /// a rationale comparing the post-move board to the current one.
    pub fn top_moves(&self, board: &Board, k: usize) -> Vec<MoveEvaluation> {
        if k == 0 {
            return Vec::new();
        }

        let mut evaluations: Vec<MoveEvaluation> = Direction::ALL
            .par_iter()
            .filter_map(|&direction| {
                apply_move(board, direction).map(|next| {
                    let score = self.expectimax(&next, self.depth - 1, Node::Chance);
                    let rationale = rationale::describe(board, &next);
                    MoveEvaluation {
                        direction,
                        score,
                        rationale,
                    }
                })
            })
            .collect();

        evaluations.sort_by(|a, b| score_cmp(a.score, b.score));
        evaluations.truncate(k);
        evaluations
    }

    /// Simulate forward on a working clone: best move, apply it, spawn a
    /// random tile, repeat. Stops early when no move is available or the
    /// clone dies. The spawns come from the caller's RNG, so two calls with
    /// the same board agree only when the RNG is seeded identically.
    pub fn best_move_sequence<R: Rng>(
        &self,
        board: &Board,
        num_moves: usize,
        rng: &mut R,
    ) -> Vec<Direction> {
        let mut sim = board.clone();
        let mut sequence = Vec::new();

        for _ in 0..num_moves {
            let Some(direction) = self.best_move(&sim) else {
                break;
            };
            sequence.push(direction);
            sim.shift(direction);
            spawn_random_tile(&mut sim, rng);
            if sim.is_game_over() {
                break;
            }
        }

        sequence
    }

    /// Score every legal root direction, in Up/Down/Left/Right order.
    fn root_scores(&self, board: &Board) -> Vec<(Direction, f64)> {
        Direction::ALL
            .par_iter()
            .filter_map(|&direction| {
                apply_move(board, direction)
                    .map(|next| (direction, self.expectimax(&next, self.depth - 1, Node::Chance)))
            })
            .collect()
    }

    fn expectimax(&self, board: &Board, depth: usize, node: Node) -> f64 {
        if depth == 0 || board.is_game_over() {
            return evaluate(board, &self.weights);
        }
        match node {
            Node::Max => self.max_node(board, depth),
            Node::Chance => self.chance_node(board, depth),
        }
    }

    fn max_node(&self, board: &Board, depth: usize) -> f64 {
        let mut best: Option<f64> = None;
        for direction in Direction::ALL {
            if let Some(next) = apply_move(board, direction) {
                let score = self.expectimax(&next, depth - 1, Node::Chance);
                best = Some(best.map_or(score, |b| b.max(score)));
            }
        }
        // No direction changes the board: score the board as a leaf.
        best.unwrap_or_else(|| evaluate(board, &self.weights))
    }

    /// Average over every empty cell receiving a 2 (weight 0.9) or a 4
    /// (weight 0.1), divided by the raw empty-cell count. This reproduces
    /// the per-cell averaging of the original implementation rather than a
    /// normalized expectation.
    fn chance_node(&self, board: &Board, depth: usize) -> f64 {
        let empties = board.empty_cells();
        if empties.is_empty() {
            return evaluate(board, &self.weights);
        }

        let mut total = 0.0;
        for &(row, col) in &empties {
            let mut with_two = board.clone();
            with_two.set(row, col, Some(Tile::new(2)));
            total += 0.9 * self.expectimax(&with_two, depth - 1, Node::Max);

            let mut with_four = board.clone();
            with_four.set(row, col, Some(Tile::new(4)));
            total += 0.1 * self.expectimax(&with_four, depth - 1, Node::Max);
        }

        total / empties.len() as f64
    }
}

impl Default for Expectimax {
    fn default() -> Self {
        Self::new()
    }
}

fn score_cmp(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
