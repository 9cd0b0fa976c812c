//! Event reporting around estimation runs
//!
//! The normalizer and evaluator are pure and never log. Hosts that want to
//! observe a run hand a [`Reporter`] to the
//! [`Estimator`](crate::klm::processor::Estimator), which calls it after each step.

use crate::klm::evaluator::Evaluation;
use crate::klm::sequence::{OperatorSequence, SourcePosition};
use serde::Serialize;
use tracing::{info, warn};

/// Hooks invoked by the estimator. All of them default to doing nothing.
pub trait Reporter {
    /// Called once per document, after normalization.
    fn normalized(&mut self, _sequence: &OperatorSequence) {}

    /// Called once per cost table, after evaluation.
    fn evaluated(&mut self, _table: &str, _sequence: &OperatorSequence, _evaluation: &Evaluation) {
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn normalized(&mut self, sequence: &OperatorSequence) {
        info!(operators = %sequence, "Input operators were: {}", sequence);
    }

    fn evaluated(&mut self, table: &str, sequence: &OperatorSequence, evaluation: &Evaluation) {
        for warning in &evaluation.warnings {
            match sequence.origin(warning.position) {
                Some(origin) => warn!(table, %origin, "{}", warning),
                None => warn!(table, "{}", warning),
            }
        }
        info!(
            table,
            total = evaluation.total,
            warnings = evaluation.warnings.len(),
            "evaluated operators"
        );
    }
}

/// A recorded estimation event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum Event {
    Normalized {
        operators: String,
    },
    Unrecognized {
        table: String,
        character: char,
        position: usize,
        origin: Option<SourcePosition>,
    },
    Evaluated {
        table: String,
        total: f64,
        warnings: usize,
    },
}

/// Keeps every event in memory, in the order it happened.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }
}

impl Reporter for EventLog {
    fn normalized(&mut self, sequence: &OperatorSequence) {
        self.events.push(Event::Normalized {
            operators: sequence.to_string(),
        });
    }

    fn evaluated(&mut self, table: &str, sequence: &OperatorSequence, evaluation: &Evaluation) {
        for warning in &evaluation.warnings {
            self.events.push(Event::Unrecognized {
                table: table.to_string(),
                character: warning.character,
                position: warning.position,
                origin: sequence.origin(warning.position),
            });
        }
        self.events.push(Event::Evaluated {
            table: table.to_string(),
            total: evaluation.total,
            warnings: evaluation.warnings.len(),
        });
    }
}
