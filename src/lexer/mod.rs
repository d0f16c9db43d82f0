//! Lexical analysis for xnilang
//!
//! Converts source text into a flat stream of operand, parenthesis and symbol tokens.

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Token, TokenCategory, TokenKind};
