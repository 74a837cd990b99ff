use std::any::Any;

use crate::error::{ErrorKind, ParseError};
use crate::{Position, Span};

/// What a `user(..)` handler sees of a successful match.
pub struct UserItem<'c> {
    span: Span,
    input: &'c str,
    state: Option<&'c mut (dyn Any + 'static)>,
    errors: &'c mut Vec<ParseError>,
    reported: bool,
}

impl<'c> UserItem<'c> {
    pub(crate) fn new(
        span: Span,
        input: &'c str,
        state: Option<&'c mut (dyn Any + 'static)>,
        errors: &'c mut Vec<ParseError>,
    ) -> Self {
        Self {
            span,
            input,
            state,
            errors,
            reported: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn begin(&self) -> Position {
        self.span.begin
    }

    pub fn end(&self) -> Position {
        self.span.end
    }

    /// Matched text.
    pub fn text(&self) -> &'c str {
        self.span.text(self.input)
    }

    /// The parse's user state, if one was given and it is an `S`.
    pub fn state<S: Any>(&mut self) -> Option<&mut S> {
        self.state.as_deref_mut()?.downcast_mut::<S>()
    }

    /// Record a `User(code)` error over the matched span.
    pub fn report(&mut self, code: u32) {
        self.errors
            .push(ParseError::new(self.span, ErrorKind::User(code)));
        self.reported = true;
    }

    pub(crate) fn reported(&self) -> bool {
        self.reported
    }
}
