//! # klm
//!
//! Task completion time estimation with the Keystroke-Level Model.
//!
//! Operator documents are plain text: one or more single-letter operator codes
//! (`K`, `P`, `H`, `B`, `M`, ...), optionally preceded by a repeat count, with
//! `#` comments and arbitrary whitespace:
//!
//! ```text
//! M P B      # pick the first field
//! H 13K      # type the name
//! ```
//!
//! The core is two pure passes, see [`klm::normalizer`] and [`klm::evaluator`].
//! Everything else ([`klm::processor`], [`klm::config`], [`klm::reporting`]) is
//! host plumbing around them.

pub mod klm;
