//! The context/result protocol threaded through parser graphs.
//!
//! A `Context` is an immutable (input, position) pair; advancing always
//! produces a new `Context`. A `ParseResult` is the outcome of one parse
//! attempt: success with a value and the position after consumption, or
//! failure with a message and the position of the violated expectation.
//! `parse` itself never errors for ordinary grammar failure; forcing the
//! value of a failure is what raises a structured [`ParseError`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;
use crate::value::Value;

/// An immutable view of the input paired with the current scan position.
///
/// Positions are byte offsets into the input; consuming "one unit" means
/// consuming one `char` and advancing by its UTF-8 length.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Context<'s> {
    input: &'s str,
    position: usize,
}

impl<'s> Context<'s> {
    /// Creates a context at the start of `input`.
    pub fn new(input: &'s str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns a new context over the same input at `position`.
    pub fn at(&self, position: usize) -> Self {
        debug_assert!(
            position <= self.input.len(),
            "position {} out of bounds for input of length {}",
            position,
            self.input.len()
        );
        Self {
            input: self.input,
            position,
        }
    }

    pub fn input(&self) -> &'s str {
        self.input
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'s str {
        &self.input[self.position..]
    }

    /// The next unconsumed character, if any.
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// A success at the current position, consuming nothing.
    pub fn success(&self, value: Value) -> ParseResult {
        ParseResult::Success {
            value,
            position: self.position,
        }
    }

    /// A success that consumed input up to `position`.
    pub fn success_at(&self, value: Value, position: usize) -> ParseResult {
        ParseResult::Success { value, position }
    }

    /// A failure at the current position.
    pub fn failure(&self, message: impl Into<String>) -> ParseResult {
        ParseResult::Failure {
            message: message.into(),
            position: self.position,
        }
    }

    /// A failure at an explicit position.
    pub fn failure_at(&self, message: impl Into<String>, position: usize) -> ParseResult {
        ParseResult::Failure {
            message: message.into(),
            position,
        }
    }
}

/// The outcome of a parse attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParseResult {
    Success { value: Value, position: usize },
    Failure { message: String, position: usize },
}

impl ParseResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ParseResult::Failure { .. })
    }

    /// The position after this attempt: end of consumption on success, the
    /// position of the violated expectation on failure.
    pub fn position(&self) -> usize {
        match self {
            ParseResult::Success { position, .. } | ParseResult::Failure { position, .. } => {
                *position
            }
        }
    }

    /// The failure message, if this is a failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            ParseResult::Success { .. } => None,
            ParseResult::Failure { message, .. } => Some(message),
        }
    }

    /// The value, if this is a success.
    pub fn ok(&self) -> Option<&Value> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            ParseResult::Failure { .. } => None,
        }
    }

    /// Forces the value. On failure this returns a [`ParseError`] wrapping
    /// this result; it never yields a sentinel value.
    pub fn value(&self) -> Result<&Value, ParseError> {
        match self {
            ParseResult::Success { value, .. } => Ok(value),
            ParseResult::Failure { .. } => Err(ParseError::from_failure(self.clone())),
        }
    }

    /// Forces the value, consuming the result.
    pub fn into_value(self) -> Result<Value, ParseError> {
        match self {
            ParseResult::Success { value, .. } => Ok(value),
            ParseResult::Failure { .. } => Err(ParseError::from_failure(self)),
        }
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseResult::Success { value, position } => {
                write!(f, "Success[{}]: {}", position, value)
            }
            ParseResult::Failure { message, position } => {
                write!(f, "Failure[{}]: {}", position, message)
            }
        }
    }
}
