//! Line-oriented value reading
//!
//! Reads a sequence of decimal tokens, one per line. Lines that fail the
//! accepted numeric-literal shape are skipped and counted; a decimal
//! comma aborts with a recoverable [`ParseError::DecimalComma`] so the
//! caller can surface a precise message without losing prior state.

use crate::token::{classify_token, parse_decimal, ParseError, ParseResult, TokenShape};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Values parsed from a token sequence, with ingestion feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedValues {
    /// Parsed values in input order (unfiltered, unsorted)
    pub values: Vec<f64>,
    /// Number of non-empty lines skipped for not matching the accepted shape
    pub skipped: usize,
}

/// Parse one-value-per-line text.
///
/// Empty lines are ignored. Returns [`ParseError::NoValues`] when the
/// input yields no parseable value at all, which keeps "file was not
/// numeric" distinguishable from "values were filtered out" downstream.
pub fn read_values_str(text: &str) -> ParseResult<ParsedValues> {
    let mut values = Vec::new();
    let mut skipped = 0;

    for (index, line) in text.lines().enumerate() {
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        match classify_token(token) {
            TokenShape::Decimal => values.push(parse_decimal(token)),
            TokenShape::CommaDecimal => {
                return Err(ParseError::DecimalComma {
                    line: index + 1,
                    token: token.to_string(),
                });
            }
            TokenShape::Other => skipped += 1,
        }
    }

    if values.is_empty() {
        return Err(ParseError::NoValues);
    }

    tracing::debug!(
        parsed = values.len(),
        skipped,
        "parsed value sequence"
    );
    Ok(ParsedValues { values, skipped })
}

/// Parse one-value-per-line text from any buffered reader
pub fn read_values(mut reader: impl std::io::BufRead) -> ParseResult<ParsedValues> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    read_values_str(&text)
}

/// Parse a one-value-per-line text file
pub fn read_values_file(path: impl AsRef<Path>) -> ParseResult<ParsedValues> {
    let text = fs::read_to_string(path)?;
    read_values_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reads_values_in_order() {
        let parsed = read_values_str("1.000\n8.000\n27.000\n").unwrap();
        assert_eq!(parsed.values, vec![1.0, 8.0, 27.0]);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_skips_non_numeric_lines() {
        let parsed = read_values_str("volume\n2.5\n-3\n4\n").unwrap();
        assert_eq!(parsed.values, vec![2.5, 4.0]);
        assert_eq!(parsed.skipped, 2);
    }

    #[test]
    fn test_ignores_blank_lines_and_whitespace() {
        let parsed = read_values_str("\n  1.5  \n\n2.5\n").unwrap();
        assert_eq!(parsed.values, vec![1.5, 2.5]);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_decimal_comma_is_a_format_error() {
        let error = read_values_str("1.0\n2,5\n3.0\n").unwrap_err();
        match error {
            ParseError::DecimalComma { line, ref token } => {
                assert_eq!(line, 2);
                assert_eq!(token, "2,5");
            }
            other => panic!("unexpected error {other}"),
        }
        assert!(error.to_string().contains("decimal point"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(read_values_str(""), Err(ParseError::NoValues));
        assert_eq!(read_values_str("header\nonly text\n"), Err(ParseError::NoValues));
    }

    #[test]
    fn test_read_values_from_reader() {
        let parsed = read_values(std::io::Cursor::new("1.5\n2.5\n")).unwrap();
        assert_eq!(parsed.values, vec![1.5, 2.5]);
    }

    #[test]
    fn test_read_values_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1.0\n2.0\n3.0").unwrap();
        let parsed = read_values_file(file.path()).unwrap();
        assert_eq!(parsed.values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let error = read_values_file("/nonexistent/values.txt").unwrap_err();
        assert!(matches!(error, ParseError::Io(_)));
    }
}
