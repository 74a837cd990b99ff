//! Builder-pattern printer for rendering parse errors.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use crate::Span;
use crate::error::{ErrorMessages, Errors, ParseError};

/// Builder for rendering [`Errors`] with various options.
///
/// Without a source the errors are printed as plain `line:column: message`
/// lines. By default only the furthest error is shown.
pub struct ErrorsPrinter<'e, 's> {
    errors: &'e Errors,
    source: Option<&'s str>,
    path: Option<&'s str>,
    messages: Option<&'s ErrorMessages>,
    colored: bool,
    all: bool,
}

impl<'e, 's> ErrorsPrinter<'e, 's> {
    pub fn new(errors: &'e Errors) -> Self {
        Self {
            errors,
            source: None,
            path: None,
            messages: None,
            colored: false,
            all: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    /// Texts for user error codes.
    pub fn messages(mut self, messages: &'s ErrorMessages) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Show every candidate instead of the furthest one.
    pub fn all(mut self, value: bool) -> Self {
        self.all = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, error) in self.selected().enumerate() {
            let message = self.describe(error);
            let label = error.span.begin.to_string();
            let range = adjust_range(error.span, source);

            let mut snippet = Snippet::source(source)
                .line_start(1)
                .annotation(AnnotationKind::Primary.span(range).label(&label));
            if let Some(p) = self.path {
                snippet = snippet.path(p);
            }

            let report: Vec<Group> = vec![Level::ERROR.primary_title(&message).element(snippet)];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, error) in self.selected().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}: {}", error.span.begin, self.describe(error))?;
        }
        Ok(())
    }

    fn selected(&self) -> impl Iterator<Item = &'e ParseError> {
        let take = if self.all { self.errors.len() } else { 1 };
        self.errors.iter().take(take)
    }

    fn describe(&self, error: &ParseError) -> String {
        match self.messages {
            Some(messages) => messages.describe(error),
            None => error.kind.to_string(),
        }
    }
}

/// Empty spans are widened to the next character so the caret has something
/// to point at.
fn adjust_range(span: Span, source: &str) -> Range<usize> {
    let Range { start, end } = span.range();
    if start != end {
        return start..end;
    }
    let width = source
        .get(start..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    start..start + width
}

impl Errors {
    pub fn printer(&self) -> ErrorsPrinter<'_, '_> {
        ErrorsPrinter::new(self)
    }
}
