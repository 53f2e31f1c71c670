//! Structured error raised when a failed parse's value is forced.
//!
//! Grammar failure is ordinary data: combinators communicate it as a
//! `ParseResult::Failure` and never unwind. `ParseError` exists for the
//! boundary where a caller demands the value anyway; it wraps the
//! originating result so the failure stays inspectable after unwinding.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::context::ParseResult;

/// The error produced by forcing the value of a failed [`ParseResult`].
#[derive(Error, Debug, Clone)]
#[error("{message} at {position}")]
pub struct ParseError {
    message: String,
    position: usize,
    result: ParseResult,
    src: Option<Arc<NamedSource<String>>>,
}

impl ParseError {
    /// Wraps a failure result. Callers outside the crate obtain instances
    /// through [`ParseResult::value`] rather than constructing them.
    pub(crate) fn from_failure(result: ParseResult) -> Self {
        let message = result
            .message()
            .unwrap_or("parse failure forced on a success")
            .to_string();
        let position = result.position();
        Self {
            message,
            position,
            result,
            src: None,
        }
    }

    /// Attaches the parsed source text so diagnostic renderers can point at
    /// the failure position. Does not change the message, position, or the
    /// wrapped result.
    pub fn with_source(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.src = Some(Arc::new(NamedSource::new(name.into(), text.into())));
        self
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The position of the violated expectation.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The originating result this error was forced from.
    pub fn result(&self) -> &ParseResult {
        &self.result
    }
}

impl Diagnostic for ParseError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("weft::parse::failure"))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = SourceSpan::from(self.position..self.position);
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.message.clone()),
            span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src
            .as_ref()
            .map(|src| &**src as &dyn miette::SourceCode)
    }
}
