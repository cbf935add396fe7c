//! Autonomous play: exhaustive placement search plus a one-action stepper.
//!
//! The search tries every (rotation, column) pair for the current piece, drops
//! it straight down from row 0, and scores the resulting board:
//!
//! ```text
//! score = -5 * filled_height - 10 * holes + 100 * lines_cleared
//! ```
//!
//! The stepper then moves the live piece toward the winning target one action
//! at a time: rotation first, then column, then a hard drop.

use arrayvec::ArrayVec;

use crate::core::{rotate, Board, Piece};
use crate::types::{Direction, Position, Rotation, BOARD_WIDTH};

const HEIGHT_WEIGHT: i32 = -5;
const HOLE_WEIGHT: i32 = -10;
const LINE_WEIGHT: i32 = 100;

/// Upper bound on candidates: 4 rotations x every column
const MAX_PLACEMENTS: usize = 4 * BOARD_WIDTH as usize;

/// Where the AI wants the current piece to end up before dropping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AiTarget {
    /// Column of the piece origin
    pub x: i8,
    /// Absolute rotation the piece must reach
    pub rotation: Rotation,
}

/// One legal drop outcome considered by the search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub target: AiTarget,
    /// Resting position of the piece origin
    pub resting: Position,
    pub score: i32,
}

/// Stepper state for one AI decision
///
/// Precedence is fixed: rotation is aligned before the column, and the piece
/// only drops once both match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiPhase {
    AlignRotation,
    AlignColumn(Direction),
    Drop,
}

impl AiPhase {
    /// Phase the live piece is in relative to `target`
    pub fn for_piece(piece: &Piece, target: AiTarget) -> Self {
        if piece.rotation != target.rotation {
            AiPhase::AlignRotation
        } else if piece.position.x < target.x {
            AiPhase::AlignColumn(Direction::Right)
        } else if piece.position.x > target.x {
            AiPhase::AlignColumn(Direction::Left)
        } else {
            AiPhase::Drop
        }
    }
}

/// Lowest valid origin for `piece` in column `x`, dropping from row 0
///
/// Returns `None` when the piece cannot rest anywhere in that column.
pub fn resting_position(board: &Board, piece: &Piece, x: i8) -> Option<Position> {
    let mut pos = Position::new(x, 0);
    while board.is_valid_position(piece, pos.offset(0, 1)) {
        pos = pos.offset(0, 1);
    }
    board.is_valid_position(piece, pos).then_some(pos)
}

/// Heuristic value of locking `piece` (at its own position) onto `board`
///
/// Works on a scratch copy; `board` is untouched.
pub fn evaluate_placement(board: &Board, piece: &Piece) -> i32 {
    let mut scratch = board.clone();
    scratch.place_piece(piece);
    let lines = scratch.clear_completed_rows() as i32;

    HEIGHT_WEIGHT * scratch.filled_height() as i32
        + HOLE_WEIGHT * scratch.holes() as i32
        + LINE_WEIGHT * lines
}

/// Every legal drop of `piece`, rotation-major then column-minor
///
/// Rotation index 0 is the piece as given; each further index adds one
/// clockwise turn.
pub fn enumerate_placements(board: &Board, piece: &Piece) -> ArrayVec<Placement, MAX_PLACEMENTS> {
    let mut out = ArrayVec::new();
    let mut candidate = *piece;

    for turns in 0..4 {
        if turns > 0 {
            candidate = rotate(&candidate);
        }
        for x in 0..BOARD_WIDTH as i8 {
            let Some(resting) = resting_position(board, &candidate, x) else {
                continue;
            };
            let score = evaluate_placement(board, &candidate.with_position(resting));
            out.push(Placement {
                target: AiTarget {
                    x,
                    rotation: candidate.rotation,
                },
                resting,
                score,
            });
        }
    }

    out
}

/// Best target for `piece`, or `None` when no rotation fits in any column
///
/// Ties keep the first candidate found (fewest extra turns, then lowest column).
pub fn find_best_move(board: &Board, piece: &Piece) -> Option<AiTarget> {
    let mut best: Option<Placement> = None;
    for placement in enumerate_placements(board, piece) {
        if best.map_or(true, |b| placement.score > b.score) {
            best = Some(placement);
        }
    }
    best.map(|p| p.target)
}
