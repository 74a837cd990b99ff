//! Parse errors and the crate error type.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::Span;
use crate::ast::ConstructError;
use crate::engine::RuntimeError;

/// Why a terminal or predicate failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    Syntax,
    /// The input ended where more was expected.
    InvalidEof,
    /// Reported by a `user(..)` handler.
    User(u32),
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Syntax => f.write_str("syntax error"),
            ErrorKind::InvalidEof => f.write_str("unexpected end of input"),
            ErrorKind::User(code) => write!(f, "error {code}"),
        }
    }
}

/// One candidate failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub span: Span,
    pub kind: ErrorKind,
}

impl ParseError {
    pub fn new(span: Span, kind: ErrorKind) -> Self {
        Self { span, kind }
    }
}

/// `line:column: message`
impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span.begin, self.kind)
    }
}

/// Candidate errors of a failed parse, furthest first.
///
/// Errors at the same offset keep the order in which they were recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Errors {
    errors: Vec<ParseError>,
}

impl Errors {
    pub fn new(mut errors: Vec<ParseError>) -> Self {
        errors.sort_by(|a, b| b.span.begin.offset.cmp(&a.span.begin.offset));
        Self { errors }
    }

    /// The furthest failure.
    pub fn best(&self) -> Option<&ParseError> {
        self.errors.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParseError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn as_slice(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<ParseError> {
        self.errors
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.best() {
            Some(best) => write!(f, "{best}"),
            None => f.write_str("parse failed"),
        }
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a ParseError;
    type IntoIter = std::slice::Iter<'a, ParseError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Texts for `User(code)` errors.
#[derive(Clone, Debug, Default)]
pub struct ErrorMessages {
    messages: IndexMap<u32, String>,
}

impl ErrorMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, code: u32, message: impl Into<String>) -> Self {
        self.insert(code, message);
        self
    }

    pub fn insert(&mut self, code: u32, message: impl Into<String>) {
        self.messages.insert(code, message.into());
    }

    pub fn get(&self, code: u32) -> Option<&str> {
        self.messages.get(&code).map(String::as_str)
    }

    /// Message for `error`: the registered text for user codes, the kind's
    /// default otherwise.
    pub fn describe(&self, error: &ParseError) -> String {
        match error.kind {
            ErrorKind::User(code) => match self.get(code) {
                Some(message) => message.to_string(),
                None => error.kind.to_string(),
            },
            kind => kind.to_string(),
        }
    }
}

/// Errors that can occur during parsing.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The input does not match the grammar.
    #[error("{0}")]
    Syntax(Errors),

    /// The match log does not fit the bound node types.
    #[error("AST construction failed: {0}")]
    Construct(#[from] ConstructError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Candidate errors, for syntax failures.
    pub fn errors(&self) -> Option<&Errors> {
        match self {
            Error::Syntax(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, Error>;
