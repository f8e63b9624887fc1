//! Lint checks for position strings.
//!
//! The decoder accepts anything and quietly falls back to defaults. These
//! checks report the input that fallback would swallow: stray characters,
//! missing or repeated numbers, suffixes that contradict each other, and
//! suffixes in the wrong place.

use std::fmt;

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::parser::lexer::{lex, Span, Token};

/// A lint warning about a position string
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
    pub span: Span,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    /// Not exactly four tokens
    Arity,
    /// Characters outside the grammar, or a missing / repeated number
    Syntax,
    /// Suffixes that cannot both apply
    Conflict,
    /// Suffix not valid for this kind of token, or out of order
    Placement,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Arity => write!(f, "arity"),
            LintCategory::Syntax => write!(f, "syntax"),
            LintCategory::Conflict => write!(f, "conflict"),
            LintCategory::Placement => write!(f, "placement"),
        }
    }
}

impl LintWarning {
    fn new(category: LintCategory, message: impl Into<String>, span: Span) -> Self {
        Self {
            category,
            message: message.into(),
            span,
        }
    }

    /// Format the warning with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Warning, filename, self.span.start)
            .with_message(format!("[{}] {}", self.category, self.message))
            .with_label(
                Label::new((filename, self.span.clone()))
                    .with_message(&self.message)
                    .with_color(Color::Yellow),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: [{}] {}", filename, self.category, self.message),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} at {}..{}",
            self.category, self.message, self.span.start, self.span.end
        )
    }
}

/// Run all lint checks on an encoded rectangle.
pub fn check(source: &str) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    let tokens = token_spans(source);

    if tokens.len() != 4 {
        let span = match tokens.get(4) {
            Some((extra, _)) => extra.start..source.len(),
            None => 0..source.len(),
        };
        warnings.push(LintWarning::new(
            LintCategory::Arity,
            format!("expected 4 tokens (x y w h), found {}", tokens.len()),
            span,
        ));
    }

    for (index, (span, text)) in tokens.iter().take(4).enumerate() {
        let kind = if index < 2 {
            TokenKind::Position
        } else {
            TokenKind::Size
        };
        check_token(text, span.start, kind, &mut warnings);
    }

    warnings
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Position,
    Size,
}

/// Whitespace-separated tokens with their byte spans
fn token_spans(source: &str) -> Vec<(Span, &str)> {
    let mut out = Vec::new();
    let mut start = None;

    for (i, c) in source.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                out.push((s..i, &source[s..i]));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s..source.len(), &source[s..]));
    }

    out
}

/// Ordering rank of a suffix within a token; numbers come first
fn rank(token: Token) -> u8 {
    match token {
        Token::Number(_) => 0,
        Token::Percent | Token::FromFarEdge | Token::FromCentre | Token::ParentMinus => 1,
        Token::AnchorFarEdge | Token::AnchorCentre => 2,
    }
}

fn suffix_name(token: Token) -> &'static str {
    match token {
        Token::Number(_) => "number",
        Token::Percent => "'%'",
        Token::FromFarEdge => "'R'",
        Token::FromCentre => "'C'",
        Token::AnchorFarEdge => "'r'",
        Token::AnchorCentre => "'c'",
        Token::ParentMinus => "'M'",
    }
}

fn check_token(text: &str, offset: usize, kind: TokenKind, warnings: &mut Vec<LintWarning>) {
    let shift = |span: Span| (span.start + offset)..(span.end + offset);
    let token_span = offset..offset + text.len();

    let mut parts: Vec<(Token, Span)> = Vec::new();
    for (result, span) in lex(text) {
        match result {
            Ok(token) => parts.push((token, shift(span))),
            Err(()) => warnings.push(LintWarning::new(
                LintCategory::Syntax,
                format!("unexpected '{}'", &text[span.clone()]),
                shift(span),
            )),
        }
    }

    let numbers: Vec<&Span> = parts
        .iter()
        .filter(|(t, _)| matches!(t, Token::Number(_)))
        .map(|(_, s)| s)
        .collect();
    match numbers.as_slice() {
        [] => warnings.push(LintWarning::new(
            LintCategory::Syntax,
            "missing number",
            token_span.clone(),
        )),
        [_] => {}
        [_, extra, ..] => warnings.push(LintWarning::new(
            LintCategory::Syntax,
            "more than one number in a token",
            (*extra).clone(),
        )),
    }

    let mut last_rank = 0;
    let mut seen: Vec<Token> = Vec::new();
    for (token, span) in &parts {
        let token = *token;
        if matches!(token, Token::Number(_)) {
            if !seen.is_empty() {
                warnings.push(LintWarning::new(
                    LintCategory::Placement,
                    "number must come before any suffix",
                    span.clone(),
                ));
            }
            continue;
        }

        let allowed = match kind {
            TokenKind::Position => !matches!(token, Token::ParentMinus),
            TokenKind::Size => matches!(token, Token::Percent | Token::ParentMinus),
        };
        if !allowed {
            let what = match kind {
                TokenKind::Position => "an x or y position",
                TokenKind::Size => "a width or height",
            };
            warnings.push(LintWarning::new(
                LintCategory::Placement,
                format!("{} is not valid in {}", suffix_name(token), what),
                span.clone(),
            ));
            continue;
        }

        if seen.contains(&token) {
            warnings.push(LintWarning::new(
                LintCategory::Conflict,
                format!("{} repeated", suffix_name(token)),
                span.clone(),
            ));
        } else if let Some(other) = seen.iter().find(|s| rank(**s) == rank(token)) {
            warnings.push(LintWarning::new(
                LintCategory::Conflict,
                format!(
                    "{} conflicts with {}",
                    suffix_name(token),
                    suffix_name(*other)
                ),
                span.clone(),
            ));
        } else if rank(token) < last_rank {
            warnings.push(LintWarning::new(
                LintCategory::Placement,
                format!("{} must come before the anchor suffix", suffix_name(token)),
                span.clone(),
            ));
        }

        last_rank = last_rank.max(rank(token));
        seen.push(token);
    }
}
