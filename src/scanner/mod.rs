//! Scanner (tokenizer) for expression text
//!
//! Converts raw text into a stream of [`Token`]s consumed by the evaluator.
//! Each step of the drive loop tries, in order:
//!
//! 1. a numeric literal ([`scan_number`]),
//! 2. the longest operator symbol ([`registry::lookup`]),
//! 3. whitespace, which is skipped.
//!
//! Anything else is an [`EvalError::InvalidSyntax`] and ends the stream.
//!
//! Positions are byte offsets into the source text.

use crate::engine::errors::EvalError;
use crate::registry::{self, Operator};
use tracing::trace;

/// One lexical element of an expression
#[derive(Debug, Clone, Copy)]
pub enum Token {
    Number { value: f64, position: usize },
    Operator(Operator),
}

/// Greedily read a decimal literal starting at byte offset `start`.
///
/// Consumes an optional integer part, then an optional single `.` and
/// fractional part. Returns the offset just past what was consumed and the
/// parsed value, or `None` when no digit was consumed (a lone `.` included).
pub fn scan_number(text: &str, start: usize) -> (usize, Option<f64>) {
    let bytes = text.as_bytes();
    let mut end = start;
    let mut digits = 0;

    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        digits += 1;
    }

    if digits == 0 {
        return (end, None);
    }

    (end, text[start..end].parse::<f64>().ok())
}

/// Iterator over the tokens of an expression
pub struct Scanner<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Scanner { text, offset: 0 }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < self.text.len() {
            let start = self.offset;

            if let (end, Some(value)) = scan_number(self.text, start) {
                self.offset = end;
                trace!(value, position = start, "scanned number");
                return Some(Ok(Token::Number {
                    value,
                    position: start,
                }));
            }

            let rest = &self.text[start..];
            if let Some(op) = registry::lookup(rest) {
                self.offset = start + op.symbol.len();
                trace!(symbol = op.symbol, position = start, "scanned operator");
                return Some(Ok(Token::Operator(op.at(start))));
            }

            match rest.chars().next() {
                Some(ch) if ch.is_whitespace() => self.offset += ch.len_utf8(),
                _ => {
                    // Stop the stream after the first bad character
                    self.offset = self.text.len();
                    return Some(Err(EvalError::InvalidSyntax {
                        position: Some(start),
                    }));
                }
            }
        }

        None
    }
}
