//! Text encoding of coordinates
//!
//! Decoding is best-effort: a token that does not follow the grammar still
//! yields a value and a mode, with missing parts falling back to zero and the
//! absolute modes. Use [`crate::lint`] to find out whether a string was clean.

use crate::geometry::config::{EncodingConfig, MAX_DECIMALS};
use crate::geometry::mode::{Anchor, AxisMode, PositionBasis, SizeMode};

use super::lexer::{lex_lossy, Token};

/// Decode an x or y token such as `-50Rc` or `40%c`
pub fn decode_position(token: &str) -> (f64, AxisMode) {
    let parts = lex_lossy(token);
    let has = |t: Token| parts.contains(&t);

    let anchor = if has(Token::AnchorFarEdge) {
        Anchor::FarEdge
    } else if has(Token::AnchorCentre) {
        Anchor::Centre
    } else {
        Anchor::NearEdge
    };

    let number = first_number(&parts);

    let (value, basis) = if has(Token::Percent) {
        (number / 100.0, PositionBasis::Proportional)
    } else if has(Token::FromFarEdge) {
        (number, PositionBasis::FromFarEdge)
    } else if has(Token::FromCentre) {
        (number, PositionBasis::FromCentre)
    } else {
        (number, PositionBasis::FromNearEdge)
    };

    (value, AxisMode::new(anchor, basis))
}

/// Decode a width or height token such as `150`, `50%` or `20M`
pub fn decode_size(token: &str) -> (f64, SizeMode) {
    let parts = lex_lossy(token);
    let number = first_number(&parts);

    if parts.contains(&Token::Percent) {
        (number / 100.0, SizeMode::Proportional)
    } else if parts.contains(&Token::ParentMinus) {
        (number, SizeMode::ParentMinus)
    } else {
        (number, SizeMode::Absolute)
    }
}

fn first_number(parts: &[Token]) -> f64 {
    parts
        .iter()
        .find_map(|t| match t {
            Token::Number(n) => Some(*n),
            _ => None,
        })
        .unwrap_or(0.0)
}

/// Encode an x or y value with its basis and anchor suffixes
pub fn encode_position(value: f64, mode: AxisMode, config: &EncodingConfig) -> String {
    let mut s = match mode.basis {
        PositionBasis::Proportional => {
            format!("{}%", format_number(value * 100.0, config.proportional_decimals))
        }
        PositionBasis::FromFarEdge => {
            format!("{}R", format_number(value, config.absolute_decimals))
        }
        PositionBasis::FromCentre => {
            format!("{}C", format_number(value, config.absolute_decimals))
        }
        PositionBasis::FromNearEdge => format_number(value, config.absolute_decimals),
    };

    match mode.anchor {
        Anchor::FarEdge => s.push('r'),
        Anchor::Centre => s.push('c'),
        Anchor::NearEdge => {}
    }

    s
}

/// Encode a width or height value with its size suffix
pub fn encode_size(value: f64, mode: SizeMode, config: &EncodingConfig) -> String {
    match mode {
        SizeMode::Proportional => {
            format!("{}%", format_number(value * 100.0, config.proportional_decimals))
        }
        SizeMode::ParentMinus => format!("{}M", format_number(value, config.absolute_decimals)),
        SizeMode::Absolute => format_number(value, config.absolute_decimals),
    }
}

/// Round to a fixed number of decimals and print without trailing zeros
fn format_number(value: f64, decimals: u32) -> String {
    let scale = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    let scaled = (value * scale).round() / scale;
    let kept = if scaled.is_finite() { scaled } else { value };
    // Adding zero turns a negative zero into a positive one
    format!("{}", kept + 0.0)
}

/// Split an encoded rectangle into its tokens, padding missing ones with ""
pub fn split_tokens(text: &str) -> [&str; 4] {
    let mut out = [""; 4];
    for (slot, token) in out.iter_mut().zip(text.split_whitespace()) {
        *slot = token;
    }
    out
}
