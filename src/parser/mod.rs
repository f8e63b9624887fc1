//! Tokenizer and text codec for position strings

pub mod codec;
pub mod lexer;

pub use lexer::{Span, Token};
