//! Cost evaluation
//!
//! A single left-to-right pass over a canonical operator sequence:
//!
//! - digits accumulate into a pending repeat count (`"130"` builds up as 1, 13, 130)
//! - an operator code known to the table adds its cost, multiplied by the pending
//!   count if there is one, and clears the count
//! - anything else is recorded as a [`Warning`] and otherwise ignored
//!
//! A count left over at the end of the sequence has no operator to apply to and
//! contributes nothing. Evaluation never fails; callers decide whether warnings
//! matter to them.

use crate::klm::costs::CostTable;
use crate::klm::sequence::OperatorSequence;
use serde::Serialize;
use std::fmt;

/// Outcome of evaluating one sequence against one cost table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    /// Predicted completion time in seconds.
    pub total: f64,
    /// One entry per unrecognized character, in sequence order.
    pub warnings: Vec<Warning>,
}

impl Evaluation {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A character that is neither a digit nor an operator code of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Warning {
    pub character: char,
    /// Index of the character in the canonical sequence.
    pub position: usize,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Given operator '{}' at position {} is neither a valid klm operator nor a digit",
            self.character, self.position
        )
    }
}

/// Predict the completion time of `sequence` using the costs in `table`.
pub fn evaluate(sequence: &OperatorSequence, table: &CostTable) -> Evaluation {
    let mut total = 0.0;
    let mut pending: Option<u64> = None;
    let mut warnings = Vec::new();

    for (position, character) in sequence.chars().enumerate() {
        if let Some(digit) = character.to_digit(10) {
            let count = pending.unwrap_or(0);
            pending = Some(count.saturating_mul(10).saturating_add(u64::from(digit)));
        } else if let Some(cost) = table.get(character) {
            total += match pending.take() {
                Some(count) => cost * count as f64,
                None => cost,
            };
        } else {
            warnings.push(Warning {
                character,
                position,
            });
        }
    }

    // A trailing count has no operator to multiply and is dropped.
    Evaluation { total, warnings }
}
