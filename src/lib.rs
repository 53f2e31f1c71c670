//! Weft: a composable parser-combinator toolkit.
//!
//! Grammars are assembled by composing small parsers into larger ones
//! (sequencing, ordered choice, bounded repetition, lookahead, semantic
//! transformation) rather than hand-writing recursive descent. Parsing an
//! input threads an immutable [`Context`] through the composite graph and
//! returns a [`ParseResult`] carrying the end position on success or a
//! message and position on failure; forcing the value of a failure yields
//! a structured [`ParseError`].
//!
//! ```rust
//! use weft::primitives::{char_of, digit};
//!
//! let number = digit().plus().flatten();
//! let list = number.separated_by(&char_of(',')).end();
//! let result = list.parse_text("1,23,456");
//! assert!(result.is_success());
//! ```
//!
//! Recursive grammars are tied together with forward references: build a
//! [`Parser::setable`] cell first, use it inside the rule bodies, and
//! redirect it with [`Parser::set`] once the full rule exists.

pub use crate::combinators::{choice_of, sequence_of, UNBOUNDED};
pub use crate::context::{Context, ParseResult};
pub use crate::errors::ParseError;
pub use crate::parser::Parser;
pub use crate::token::{Span, Token};
pub use crate::value::Value;

pub mod combinators;
pub mod context;
pub mod errors;
pub mod parser;
pub mod primitives;
pub mod token;
pub mod value;
