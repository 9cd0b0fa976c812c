//! Token definitions for klm operator documents
//!
//! The tokens are defined using the logos derive macro.
use logos::Logos;

/// All possible tokens in a klm document
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    // Everything from `#` to the end of the line
    #[regex(r"#[^\n\r\x0B\x0C\x1C-\x1E\x{85}\x{2028}\x{2029}]*")]
    Comment,

    // Spaces, tabs and line breaks alike (file/group/record separators break lines too)
    #[regex(r"[\s\x1C-\x1E]+")]
    Whitespace,

    // Operator codes, count digits and anything else
    #[regex(r"[^\s#\x1C-\x1E]", |lex| lex.slice().chars().next())]
    Symbol(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<Token> {
        Token::lexer(source).filter_map(Result::ok).collect()
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(lex_all(" \t\n  "), vec![Token::Whitespace]);
    }

    #[test]
    fn test_symbols_are_single_characters() {
        assert_eq!(
            lex_all("13k"),
            vec![Token::Symbol('1'), Token::Symbol('3'), Token::Symbol('k')]
        );
    }

    #[test]
    fn test_comment_ends_at_any_line_break() {
        for sep in ["\n", "\r", "\x0B", "\x0C", "\x1C", "\x1D", "\x1E", "\u{85}", "\u{2028}", "\u{2029}"] {
            let source = format!("# c{sep}K");
            assert_eq!(
                lex_all(&source),
                vec![Token::Comment, Token::Whitespace, Token::Symbol('K')],
                "separator {:?}",
                sep
            );
        }
    }

    #[test]
    fn test_comment_swallows_hashes() {
        assert_eq!(lex_all("# a # b"), vec![Token::Comment]);
    }
}
