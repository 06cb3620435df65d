//! Numeric token validation and parsing
//!
//! Stage one classifies a trimmed token by shape; stage two converts the
//! accepted shape to `f64`. Tokens that are not unqualified decimal
//! numbers are skipped (header lines, annotations), with one exception:
//! a token written with a decimal comma is a recoverable format error,
//! reported with a message naming the required separator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a token sequence
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A value used `,` as the decimal separator
    #[error(
        "line {line}: '{token}' uses a decimal comma; values must use a decimal point ('.'), e.g. 12.5"
    )]
    DecimalComma { line: usize, token: String },

    /// The input contained no parseable value at all
    #[error("no numeric values found in input")]
    NoValues,

    /// Underlying I/O failure while reading the input
    #[error("failed to read input: {0}")]
    Io(String),
}

impl From<std::io::Error> for ParseError {
    fn from(error: std::io::Error) -> Self {
        ParseError::Io(error.to_string())
    }
}

/// Result type alias for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Shape classification of a trimmed input token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenShape {
    /// Digits with at most one `.`: the accepted numeric-literal shape
    Decimal,
    /// Digits with exactly one `,`: a wrong-locale decimal
    CommaDecimal,
    /// Anything else (text, signs, exponents, empty)
    Other,
}

/// Classify a trimmed token.
///
/// The accepted shape is deliberately narrow: digits and at most one
/// decimal point. No sign, no exponent notation, no grouping.
pub fn classify_token(token: &str) -> TokenShape {
    if token.is_empty() {
        return TokenShape::Other;
    }
    if is_digits_with_one(token, '.') {
        return TokenShape::Decimal;
    }
    if is_digits_with_one(token, ',') && token.contains(',') {
        return TokenShape::CommaDecimal;
    }
    TokenShape::Other
}

fn is_digits_with_one(token: &str, separator: char) -> bool {
    let mut separators = 0;
    let mut digits = 0;
    for ch in token.chars() {
        if ch == separator {
            separators += 1;
        } else if ch.is_ascii_digit() {
            digits += 1;
        } else {
            return false;
        }
    }
    digits > 0 && separators <= 1
}

/// Parse an accepted decimal token.
///
/// Only call after [`classify_token`] returned [`TokenShape::Decimal`];
/// the shape guarantees the conversion succeeds.
pub fn parse_decimal(token: &str) -> f64 {
    debug_assert_eq!(classify_token(token), TokenShape::Decimal);
    token.parse().unwrap_or(f64::NAN)
}
