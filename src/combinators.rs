//! Factory combinators for building composite parsers.
//!
//! Every factory returns a new parser wrapping the receiver; the receiver
//! itself is never mutated. Graph handles are cheap to clone, so grammars
//! read as chains of factory calls:
//!
//! ```rust
//! use weft::primitives::digit;
//! let number = digit().plus().flatten();
//! assert!(number.parse_text("42").is_success());
//! ```

use std::rc::Rc;

use crate::parser::{Node, Parser};
use crate::value::Value;

/// Sentinel for an unbounded repetition limit.
pub const UNBOUNDED: usize = usize::MAX;

/// A sequence over `children` in order, producing the list of their values.
pub fn sequence_of(children: Vec<Parser>) -> Parser {
    Parser::from_node(Node::Sequence { children })
}

/// An ordered choice over `children`, each attempted from the original
/// position; the first success wins.
pub fn choice_of(children: Vec<Parser>) -> Parser {
    Parser::from_node(Node::Choice { children })
}

impl Parser {
    /// The receiver followed by `others`, producing the ordered list of all
    /// child values.
    pub fn seq(&self, others: &[Parser]) -> Parser {
        let mut children = Vec::with_capacity(1 + others.len());
        children.push(self.clone());
        children.extend(others.iter().cloned());
        sequence_of(children)
    }

    /// The receiver, or if it fails, each of `others` in order, all
    /// attempted from the original position.
    pub fn or(&self, others: &[Parser]) -> Parser {
        let mut children = Vec::with_capacity(1 + others.len());
        children.push(self.clone());
        children.extend(others.iter().cloned());
        choice_of(children)
    }

    /// Parses the receiver if possible; never fails. On inner failure,
    /// yields `Value::Nil` at the unchanged position.
    pub fn optional(&self) -> Parser {
        self.optional_with(Value::Nil)
    }

    /// Like [`Parser::optional`], with an explicit default value.
    pub fn optional_with(&self, default: Value) -> Parser {
        Parser::from_node(Node::Optional {
            inner: self.clone(),
            default,
        })
    }

    /// Zero or more repetitions.
    pub fn star(&self) -> Parser {
        self.repeat(0, UNBOUNDED)
    }

    /// One or more repetitions.
    pub fn plus(&self) -> Parser {
        self.repeat(1, UNBOUNDED)
    }

    /// Exactly `count` repetitions.
    pub fn times(&self, count: usize) -> Parser {
        self.repeat(count, count)
    }

    /// Between `min` and `max` repetitions, greedy. The accepted count lies
    /// in `[min, max]`; every accepted repetition strictly advances the
    /// position.
    pub fn repeat(&self, min: usize, max: usize) -> Parser {
        Parser::from_node(Node::Repeating {
            inner: self.clone(),
            min,
            max,
        })
    }

    /// Zero-width positive lookahead: succeeds with the receiver's value
    /// whenever the receiver does, but never consumes input.
    pub fn and(&self) -> Parser {
        Parser::from_node(Node::And {
            inner: self.clone(),
        })
    }

    /// Zero-width negative lookahead: succeeds with `Value::Nil` whenever
    /// the receiver fails, fails with a default message whenever it
    /// succeeds, and never consumes input.
    pub fn not(&self) -> Parser {
        self.not_with("unexpected input")
    }

    /// Like [`Parser::not`], with an explicit failure message.
    pub fn not_with(&self, message: impl Into<String>) -> Parser {
        Parser::from_node(Node::Not {
            inner: self.clone(),
            message: message.into(),
        })
    }

    /// Fails to match the receiver, then consumes exactly one unit of
    /// input, yielding the consumed character.
    pub fn negate(&self) -> Parser {
        self.negate_with("unexpected input")
    }

    /// Like [`Parser::negate`], with an explicit failure message.
    pub fn negate_with(&self, message: impl Into<String>) -> Parser {
        self.not_with(message)
            .seq(&[crate::primitives::any()])
            .pick(-1)
    }

    /// One or more repetitions of the receiver interleaved with
    /// `separator`, yielding the receiver's values only.
    pub fn separated_by(&self, separator: &Parser) -> Parser {
        self.seq(&[separator.seq(std::slice::from_ref(self)).star()])
            .map(|value| {
                let mut items = Vec::new();
                if let Value::List(parts) = value {
                    let mut parts = parts.into_iter();
                    if let Some(first) = parts.next() {
                        items.push(first);
                    }
                    if let Some(Value::List(pairs)) = parts.next() {
                        for pair in pairs {
                            if let Value::List(mut pair) = pair {
                                if let Some(item) = pair.pop() {
                                    items.push(item);
                                }
                            }
                        }
                    }
                }
                Value::List(items)
            })
    }

    /// Like [`Parser::separated_by`], but also accepts a trailing
    /// `separator`, whose value is appended verbatim when present.
    pub fn delimited_by(&self, separator: &Parser) -> Parser {
        self.separated_by(separator)
            .seq(&[separator.optional()])
            .map(|value| {
                let mut items = Vec::new();
                if let Value::List(parts) = value {
                    let mut parts = parts.into_iter();
                    if let Some(Value::List(inner)) = parts.next() {
                        items = inner;
                    }
                    if let Some(trailing) = parts.next() {
                        if !trailing.is_nil() {
                            items.push(trailing);
                        }
                    }
                }
                Value::List(items)
            })
    }

    /// Transforms a success value with `action`; failures pass through
    /// unchanged.
    pub fn map<F>(&self, action: F) -> Parser
    where
        F: Fn(Value) -> Value + 'static,
    {
        Parser::from_node(Node::Action {
            inner: self.clone(),
            action: Rc::new(action),
        })
    }

    /// Projects a successful list result to the element at `index`.
    /// Negative indexes address from the end; out-of-range indexes and
    /// non-list values yield `Value::Nil`.
    pub fn pick(&self, index: isize) -> Parser {
        self.map(move |value| match value.into_list() {
            Some(items) => nth_of_list(&items, index).cloned().unwrap_or_default(),
            None => Value::Nil,
        })
    }

    /// Projects a successful list result to the permuted elements at
    /// `indexes`. Negative indexes address from the end.
    pub fn permute(&self, indexes: &[isize]) -> Parser {
        let indexes = indexes.to_vec();
        self.map(move |value| match value.into_list() {
            Some(items) => Value::List(
                indexes
                    .iter()
                    .map(|&index| nth_of_list(&items, index).cloned().unwrap_or_default())
                    .collect(),
            ),
            None => Value::Nil,
        })
    }

    /// An identity delegation around the receiver, useful as a stable
    /// anchor for grammar rewriting.
    pub fn wrapped(&self) -> Parser {
        Parser::from_node(Node::Delegate {
            inner: self.clone(),
        })
    }

    /// A forward-reference cell initially targeting the receiver. The
    /// target can be redirected later with [`Parser::set`], which is how
    /// mutually recursive grammar rules are tied together.
    pub fn setable(&self) -> Parser {
        Parser::from_node(Node::Setable {
            target: self.clone(),
        })
    }

    /// Wraps a successful parse's consumed span and value into a
    /// [`Token`](crate::token::Token).
    pub fn token(&self) -> Parser {
        Parser::from_node(Node::Token {
            inner: self.clone(),
        })
    }

    /// Collapses the consumed input range of a successful parse into a
    /// single text value.
    pub fn flatten(&self) -> Parser {
        Parser::from_node(Node::Flatten {
            inner: self.clone(),
        })
    }

    /// Consumes and discards zero or more `trimmer` matches before and
    /// after the receiver.
    pub fn trim(&self, trimmer: &Parser) -> Parser {
        Parser::from_node(Node::Trimming {
            inner: self.clone(),
            trimmer: trimmer.clone(),
        })
    }

    /// Consumes and discards surrounding whitespace.
    pub fn trim_whitespace(&self) -> Parser {
        self.trim(&crate::primitives::whitespace())
    }

    /// Succeeds only when the receiver's parse ends at the end of the
    /// input; otherwise fails with the default message at the first
    /// unconsumed position.
    pub fn end(&self) -> Parser {
        self.end_with("end of input expected")
    }

    /// Like [`Parser::end`], with an explicit failure message.
    pub fn end_with(&self, message: impl Into<String>) -> Parser {
        Parser::from_node(Node::EndOfInput {
            inner: self.clone(),
            message: message.into(),
        })
    }

    /// The receiver surrounded by `front` and `end`; sugar for
    /// `front.seq(&[self, end])`.
    pub fn between(&self, front: &Parser, end: &Parser) -> Parser {
        front.seq(&[self.clone(), end.clone()])
    }
}

fn nth_of_list(items: &[Value], index: isize) -> Option<&Value> {
    let len = items.len() as isize;
    let index = if index < 0 { len + index } else { index };
    if index < 0 || index >= len {
        return None;
    }
    items.get(index as usize)
}
