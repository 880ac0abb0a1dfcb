//! Human-readable rationale for a candidate move, derived by comparing the
//! board before and after the move.

use twenty48_core::Board;
use twenty48_eval::{adjacent_equal_pairs, corner_bonus, monotonicity};

/// Monotonicity level worth calling out as good organization. Qualitative,
/// not tuned precisely.
const MONOTONICITY_NOTE_THRESHOLD: f64 = 15.0;

pub(crate) fn describe(before: &Board, after: &Board) -> String {
    let mut reasons = Vec::new();

    let merges = adjacent_equal_pairs(after);
    if merges == 1 {
        reasons.push("1 merge opportunity".to_string());
    } else if merges > 1 {
        reasons.push(format!("{merges} merge opportunities"));
    }

    let empty_before = before.empty_cell_count();
    let empty_after = after.empty_cell_count();
    if empty_after > empty_before {
        let created = empty_after - empty_before;
        if created == 1 {
            reasons.push("creates 1 empty space".to_string());
        } else {
            reasons.push(format!("creates {created} empty spaces"));
        }
    } else if empty_after == empty_before {
        reasons.push("maintains empty space".to_string());
    }

    if corner_bonus(after) > 0.0 {
        reasons.push(format!("keeps {} in corner", after.highest_tile()));
    }

    if monotonicity(after) > MONOTONICITY_NOTE_THRESHOLD {
        reasons.push("good tile organization".to_string());
    }

    if reasons.is_empty() {
        reasons.push("standard move".to_string());
    }

    reasons.join(", ")
}
