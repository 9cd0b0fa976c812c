//! Lexer for klm operator documents
//!
//! Tokenization is done entirely by logos. The token set is deliberately tiny:
//! comments, whitespace and single symbols. Deciding which symbols are operator
//! codes and which are counts is left to the evaluator, since the set of valid
//! codes depends on the cost table in use.

pub mod tokens;

pub use tokens::Token;

use logos::Logos;

/// Whether `c` ends a line. Besides `\n` and `\r` this includes vertical tab,
/// form feed, the file/group/record separators, NEL and the Unicode line and
/// paragraph separators.
pub fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{1C}'..='\u{1E}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Tokenize a document, pairing every token with its byte span.
///
/// Input the lexer cannot match is not dropped: each of its characters comes
/// back as a [`Token::Symbol`] so that it still surfaces as an unrecognized
/// operator later on.
pub fn tokenize(source: &str) -> Vec<(Token, logos::Span)> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                let span = lexer.span();
                for (offset, c) in lexer.slice().char_indices() {
                    let start = span.start + offset;
                    tokens.push((Token::Symbol(c), start..start + c.len_utf8()));
                }
            }
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizes() {
        let tokens = tokenize("K P");
        assert_eq!(tokens.len(), 3);

        assert_eq!(tokens[0], (Token::Symbol('K'), 0..1));
        assert_eq!(tokens[1], (Token::Whitespace, 1..2));
        assert_eq!(tokens[2], (Token::Symbol('P'), 2..3));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn test_comment_stops_at_line_break() {
        let tokens = tokenize("K # type\nP");
        let kinds: Vec<Token> = tokens.into_iter().map(|(t, _)| t).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Symbol('K'),
                Token::Whitespace,
                Token::Comment,
                Token::Whitespace,
                Token::Symbol('P'),
            ]
        );
    }

    #[test]
    fn test_line_breaks() {
        for c in ['\n', '\r', '\u{0B}', '\u{0C}', '\u{1D}', '\u{85}', '\u{2028}', '\u{2029}'] {
            assert!(is_line_break(c), "{:?}", c);
        }
        assert!(!is_line_break(' '));
        assert!(!is_line_break('\t'));
    }

    #[test]
    fn test_multibyte_spans() {
        let tokens = tokenize("é1");
        assert_eq!(tokens[0], (Token::Symbol('é'), 0..2));
        assert_eq!(tokens[1], (Token::Symbol('1'), 2..3));
    }
}
