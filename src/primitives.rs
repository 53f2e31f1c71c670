//! Concrete leaf matchers.
//!
//! These are collaborators of the combinator core rather than part of it:
//! the core only requires conformance to `parse(context) -> result`, which
//! any [`Parser::leaf`] provides. The set here covers the character,
//! string, and predicate primitives grammars in practice start from.

use crate::parser::Parser;
use crate::value::Value;

/// Consumes any single character.
pub fn any() -> Parser {
    Parser::leaf("any", |context| match context.peek() {
        Some(c) => context.success_at(Value::Char(c), context.position() + c.len_utf8()),
        None => context.failure("input expected"),
    })
}

/// Consumes a single character satisfying `predicate`.
pub fn char_matching<F>(predicate: F, message: impl Into<String>) -> Parser
where
    F: Fn(char) -> bool + 'static,
{
    let message = message.into();
    Parser::leaf("char", move |context| match context.peek() {
        Some(c) if predicate(c) => {
            context.success_at(Value::Char(c), context.position() + c.len_utf8())
        }
        _ => context.failure(message.clone()),
    })
}

/// Consumes the single character `expected`.
pub fn char_of(expected: char) -> Parser {
    char_matching(
        move |c| c == expected,
        format!("'{}' expected", expected),
    )
}

/// Consumes the exact string `expected`, yielding it as text.
pub fn literal(expected: &str) -> Parser {
    let expected = expected.to_string();
    let message = format!("'{}' expected", expected);
    Parser::leaf("literal", move |context| {
        if context.rest().starts_with(expected.as_str()) {
            let stop = context.position() + expected.len();
            context.success_at(Value::Text(expected.clone()), stop)
        } else {
            context.failure(message.clone())
        }
    })
}

/// Consumes a single decimal digit.
pub fn digit() -> Parser {
    char_matching(|c| c.is_ascii_digit(), "digit expected")
}

/// Consumes a single alphabetic character.
pub fn letter() -> Parser {
    char_matching(char::is_alphabetic, "letter expected")
}

/// Consumes a single alphanumeric character.
pub fn word() -> Parser {
    char_matching(char::is_alphanumeric, "letter or digit expected")
}

/// Consumes a single whitespace character.
pub fn whitespace() -> Parser {
    char_matching(char::is_whitespace, "whitespace expected")
}

/// Succeeds without consuming anything, yielding `Value::Nil`.
pub fn epsilon() -> Parser {
    Parser::leaf("epsilon", |context| context.success(Value::Nil))
}

/// Always fails with `message` at the current position.
pub fn failure(message: impl Into<String>) -> Parser {
    let message = message.into();
    Parser::leaf("failure", move |context| context.failure(message.clone()))
}
