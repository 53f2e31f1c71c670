//! Source spans and position-tagged tokens.
//!
//! A `Token` records the region of input a parser consumed alongside the
//! value it produced, so downstream tooling (error highlighting, source
//! maps) can trace values back to their provenance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Represents a span of the input, `stop` exclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub start: usize,
    pub stop: usize,
}

impl Span {
    pub fn new(start: usize, stop: usize) -> Self {
        Self { start, stop }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }
}

/// A parsed value paired with the input span it was produced from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub span: Span,
    pub value: Value,
}

impl Token {
    pub fn new(span: Span, value: Value) -> Self {
        Self { span, value }
    }

    /// Start offset of the consumed input region.
    pub fn start(&self) -> usize {
        self.span.start
    }

    /// Exclusive stop offset of the consumed input region.
    pub fn stop(&self) -> usize {
        self.span.stop
    }

    /// The value parsed from the span.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The slice of `source` this token covers, if the span is in bounds.
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.span.start..self.span.stop)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token[{}..{}]: {}",
            self.span.start, self.span.stop, self.value
        )
    }
}
