//! Lexer for a single coordinate token using logos
//!
//! A token such as `-50Rc` or `33.333%` is a number followed by suffix
//! letters. Anything the lexer does not recognise comes back as an `Err`
//! entry so callers can decide whether to ignore it or report it.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    #[regex(r"[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?", parse_number)]
    Number(f64),

    #[token("%")]
    Percent,

    // Position basis suffixes (uppercase)
    #[token("R")]
    FromFarEdge,
    #[token("C")]
    FromCentre,

    // Anchor suffixes (lowercase)
    #[token("r")]
    AnchorFarEdge,
    #[token("c")]
    AnchorCentre,

    // Size suffix
    #[token("M")]
    ParentMinus,
}

fn parse_number(lex: &mut logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Tokenize with spans, keeping unrecognised input as `Err(())` entries
pub fn lex(source: &str) -> Vec<(Result<Token, ()>, Span)> {
    Token::lexer(source).spanned().collect()
}

/// Tokenize, silently dropping anything unrecognised
pub fn lex_lossy(source: &str) -> Vec<Token> {
    Token::lexer(source).filter_map(Result::ok).collect()
}
