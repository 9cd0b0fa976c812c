//! Document normalization
//!
//! Turns a raw operator document into its canonical operator sequence:
//!
//! - everything from a `#` to the end of its line is a comment and is dropped
//! - all whitespace is dropped, line breaks included, so lines simply concatenate
//! - the remaining characters are case-folded to uppercase
//!
//! Normalization never fails. Characters that are not operator codes survive
//! untouched and are reported by the evaluator, which is the only place that
//! knows which codes are valid.

use crate::klm::lexing::{is_line_break, tokenize, Token};
use crate::klm::sequence::{OperatorSequence, SourcePosition};

/// Normalize a document into its canonical operator sequence.
pub fn normalize(document: &str) -> OperatorSequence {
    let mut sequence = OperatorSequence::default();
    let mut cursor = Cursor::new();

    for (token, span) in tokenize(document) {
        let text = &document[span];
        if let Token::Symbol(c) = token {
            let origin = cursor.position();
            for upper in c.to_uppercase() {
                sequence.push(upper, origin);
            }
        }
        cursor.advance(text);
    }

    sequence
}

/// Tracks the line and column of the next unread character.
struct Cursor {
    line: usize,
    column: usize,
    pending_cr: bool,
}

impl Cursor {
    fn new() -> Self {
        Cursor {
            line: 1,
            column: 1,
            pending_cr: false,
        }
    }

    fn position(&self) -> SourcePosition {
        SourcePosition {
            line: self.line,
            column: self.column,
        }
    }

    fn advance(&mut self, text: &str) {
        for c in text.chars() {
            match c {
                // `\r\n` counts once: the `\r` already started the new line
                '\n' if self.pending_cr => {}
                _ if is_line_break(c) => {
                    self.line += 1;
                    self.column = 1;
                }
                _ => self.column += 1,
            }
            self.pending_cr = c == '\r';
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_example() {
        assert_eq!(normalize("K # start\nP\n").as_str(), "KP");
    }

    #[test]
    fn test_empty_document() {
        assert!(normalize("").is_empty());
        assert!(normalize("   \n\t\n").is_empty());
        assert!(normalize("# only a comment").is_empty());
    }

    #[test]
    fn test_case_folding() {
        assert_eq!(normalize("mpb 2k").as_str(), "MPB2K");
    }

    #[test]
    fn test_whitespace_inside_lines_is_removed() {
        assert_eq!(normalize("1 3 K\tP").as_str(), "13KP");
    }

    #[test]
    fn test_lines_concatenate_without_separator() {
        // A count on one line still applies to the operator on the next
        assert_eq!(normalize("1\n3\nK").as_str(), "13K");
    }

    #[test]
    fn test_comment_only_to_end_of_line() {
        assert_eq!(normalize("#K\nP # B\n# M\nH").as_str(), "PH");
    }

    #[test]
    fn test_unknown_characters_survive() {
        assert_eq!(normalize("k?p").as_str(), "K?P");
    }

    #[test]
    fn test_idempotent_on_canonical_input() {
        let once = normalize("m p # c\n 12k h");
        let twice = normalize(once.as_str());
        assert_eq!(once.as_str(), twice.as_str());
    }

    #[test]
    fn test_origins() {
        let seq = normalize("K # start\n  p");
        assert_eq!(seq.origin(0), Some(SourcePosition { line: 1, column: 1 }));
        assert_eq!(seq.origin(1), Some(SourcePosition { line: 2, column: 3 }));
    }

    #[test]
    fn test_crlf_counts_as_one_line_break() {
        let seq = normalize("K\r\nP\rB");
        assert_eq!(seq.as_str(), "KPB");
        assert_eq!(seq.origin(1), Some(SourcePosition { line: 2, column: 1 }));
        assert_eq!(seq.origin(2), Some(SourcePosition { line: 3, column: 1 }));
    }

    #[test]
    fn test_comment_ends_at_every_line_separator() {
        for sep in ['\u{0B}', '\u{0C}', '\u{1C}', '\u{1D}', '\u{1E}', '\u{85}', '\u{2028}', '\u{2029}'] {
            let seq = normalize(&format!("K # c{sep}P"));
            assert_eq!(seq.as_str(), "KP", "separator {:?}", sep);
            assert_eq!(seq.origin(1), Some(SourcePosition { line: 2, column: 1 }));
        }
    }

    #[test]
    fn test_expanding_case_fold_shares_origin() {
        let seq = normalize("ß");
        assert_eq!(seq.as_str(), "SS");
        assert_eq!(seq.origin(0), seq.origin(1));
    }
}
