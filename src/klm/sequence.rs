//! Canonical operator sequences
//!
//! An [`OperatorSequence`] is the output of the normalizer: uppercase operator
//! codes and count digits with all comments and whitespace removed. It is
//! immutable once built and only ever created by [`normalize`](super::normalize).

use serde::{Serialize, Serializer};
use std::fmt;

/// Line and column (both 1-based, column counted in characters) of a
/// character in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Canonical operator sequence produced from one document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OperatorSequence {
    text: String,
    origins: Vec<SourcePosition>,
}

impl OperatorSequence {
    pub(crate) fn push(&mut self, c: char, origin: SourcePosition) {
        self.text.push(c);
        self.origins.push(origin);
    }

    /// The canonical string, e.g. `"MPB13K"`.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters in the sequence (not bytes).
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    pub fn chars(&self) -> std::str::Chars<'_> {
        self.text.chars()
    }

    /// Where the character at `position` came from in the source document.
    pub fn origin(&self, position: usize) -> Option<SourcePosition> {
        self.origins.get(position).copied()
    }
}

impl fmt::Display for OperatorSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl Serialize for OperatorSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
