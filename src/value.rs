//! Dynamic values produced by parse attempts.
//!
//! Combinators are untyped with respect to the values they produce: a leaf
//! may yield a character, a sequence yields the list of its children's
//! values, and a semantic action may substitute anything it likes. `Value`
//! is the closed set of shapes that can flow through a parser graph.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// A value produced by a successful parse.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Value {
    /// The absence of a value, e.g. a failed optional or a `not` predicate.
    #[default]
    Nil,
    /// A single character, as produced by character-level leaf matchers.
    Char(char),
    /// A piece of text, as produced by `literal` leaves and `flatten`.
    Text(String),
    /// An ordered list of child values, as produced by sequences and
    /// repetitions.
    List(Vec<Value>),
    /// A position-tagged value, as produced by `token`.
    Token(Box<Token>),
}

impl Value {
    /// Returns the type name of the value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Char(_) => "Char",
            Value::Text(_) => "Text",
            Value::List(_) => "List",
            Value::Token(_) => "Token",
        }
    }

    /// Returns true if the value is Nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the contained character if this is a Char value.
    pub fn as_char(&self) -> Option<char> {
        match self {
            Value::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Returns the contained text if this is a Text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the contained elements if this is a List value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the contained token if this is a Token value.
    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Value::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Consumes the value and returns its elements if it is a List.
    pub fn into_list(self) -> Option<Vec<Value>> {
        if let Value::List(items) = self {
            return Some(items);
        }
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Char(c) => write!(f, "{}", c),
            Value::Text(s) => write!(f, "{}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Token(token) => write!(f, "{}", token),
        }
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Token> for Value {
    fn from(token: Token) -> Self {
        Value::Token(Box::new(token))
    }
}
