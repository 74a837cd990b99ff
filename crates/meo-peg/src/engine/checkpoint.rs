//! Checkpoints for backtracking.
//!
//! Evaluation state that a failed alternative must not leak is the position
//! and the match log. Errors are never rolled back.

use crate::Position;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Checkpoint {
    pub(crate) position: Position,
    /// Match log length.
    pub(crate) match_watermark: usize,
}
