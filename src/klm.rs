//! Main module for klm library functionality

pub mod config;
pub mod costs;
pub mod evaluator;
pub mod lexing;
pub mod normalizer;
pub mod processor;
pub mod reporting;
pub mod sequence;

pub use costs::CostTable;
pub use evaluator::{evaluate, Evaluation, Warning};
pub use normalizer::normalize;
pub use sequence::{OperatorSequence, SourcePosition};
