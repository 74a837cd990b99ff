//! Tracing infrastructure for debugging grammar evaluation.
//!
//! # Design: Zero-Cost Abstraction
//!
//! Evaluation is generic over a [`Tracer`]. With [`NoopTracer`] every trait
//! method is an `#[inline(always)]` empty function and the calls disappear.
//! [`PrintTracer`] collects an indented log of rule activity instead.
//!
//! Tracing-only state (nesting depth, symbols) lives in the tracer, never in
//! the [`Context`](super::Context).

use crate::error::ParseError;
use crate::{Colors, Position, Span};
use meo_core::utils::truncate_text;

const MAX_TEXT: usize = 30;

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Default: rule enter/exit, seeds and growth. Spans only, no text.
    #[default]
    Default,
    /// Verbose (-v): adds backtracking, memo hits and the text of every
    /// match.
    Verbose,
    /// Very verbose (-vv): adds every terminal failure.
    VeryVerbose,
}

/// Tracer trait for evaluation instrumentation.
///
/// Each method is called at a specific point during evaluation:
/// - `trace_enter` - a rule invocation starts
/// - `trace_exit` - a rule invocation ends, with the match span on success
/// - `trace_unwind` - a rule invocation is abandoned by left-recursion growth
///   or by an exhausted limit
/// - `trace_seed` - left recursion detected, seed growing starts
/// - `trace_grow` - a growth iteration produced a longer match
/// - `trace_memo` - a rule invocation was answered from the memo table
/// - `trace_backtrack` - an ordered-choice alternative failed
/// - `trace_failure` - a terminal or predicate failed
pub trait Tracer {
    fn trace_enter(&mut self, rule: &str, at: Position);

    fn trace_exit(&mut self, rule: &str, matched: Option<Span>);

    fn trace_unwind(&mut self, rule: &str);

    fn trace_seed(&mut self, rule: &str, at: Position);

    fn trace_grow(&mut self, rule: &str, span: Span);

    fn trace_memo(&mut self, rule: &str, matched: Option<Span>);

    fn trace_backtrack(&mut self, to: Position);

    fn trace_failure(&mut self, error: &ParseError);
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn trace_enter(&mut self, rule: &str, at: Position) {
        (**self).trace_enter(rule, at);
    }

    fn trace_exit(&mut self, rule: &str, matched: Option<Span>) {
        (**self).trace_exit(rule, matched);
    }

    fn trace_unwind(&mut self, rule: &str) {
        (**self).trace_unwind(rule);
    }

    fn trace_seed(&mut self, rule: &str, at: Position) {
        (**self).trace_seed(rule, at);
    }

    fn trace_grow(&mut self, rule: &str, span: Span) {
        (**self).trace_grow(rule, span);
    }

    fn trace_memo(&mut self, rule: &str, matched: Option<Span>) {
        (**self).trace_memo(rule, matched);
    }

    fn trace_backtrack(&mut self, to: Position) {
        (**self).trace_backtrack(to);
    }

    fn trace_failure(&mut self, error: &ParseError) {
        (**self).trace_failure(error);
    }
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_enter(&mut self, _rule: &str, _at: Position) {}

    #[inline(always)]
    fn trace_exit(&mut self, _rule: &str, _matched: Option<Span>) {}

    #[inline(always)]
    fn trace_unwind(&mut self, _rule: &str) {}

    #[inline(always)]
    fn trace_seed(&mut self, _rule: &str, _at: Position) {}

    #[inline(always)]
    fn trace_grow(&mut self, _rule: &str, _span: Span) {}

    #[inline(always)]
    fn trace_memo(&mut self, _rule: &str, _matched: Option<Span>) {}

    #[inline(always)]
    fn trace_backtrack(&mut self, _to: Position) {}

    #[inline(always)]
    fn trace_failure(&mut self, _error: &ParseError) {}
}

mod symbol {
    pub const ENTER: &str = "▶";
    pub const MATCH: &str = "●";
    pub const NO_MATCH: &str = "○";
    pub const UNWIND: &str = "◀";
    pub const SEED: &str = "↺";
    pub const GROW: &str = "↻";
    pub const MEMO: &str = "≡";
    pub const BACKTRACK: &str = "❮";
    pub const FAILURE: &str = "✗";
}

/// Tracer that collects an indented evaluation log.
pub struct PrintTracer<'s> {
    /// Input, for match text.
    source: &'s str,
    verbosity: Verbosity,
    lines: Vec<String>,
    /// Current rule nesting.
    depth: usize,
    colors: Colors,
}

impl<'s> PrintTracer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self::builder(source).build()
    }

    pub fn builder(source: &'s str) -> PrintTracerBuilder<'s> {
        PrintTracerBuilder {
            source,
            verbosity: Verbosity::Default,
            colored: false,
        }
    }

    /// Collected trace lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn dump(&self) -> String {
        self.lines.join("\n")
    }

    /// Print all trace lines to stdout.
    pub fn print(&self) {
        for line in &self.lines {
            println!("{}", line);
        }
    }

    fn push(&mut self, symbol: &str, content: String) {
        let indent = "  ".repeat(self.depth);
        self.lines.push(format!("{indent}{symbol} {content}"));
    }

    fn format_rule(&self, rule: &str) -> String {
        let c = &self.colors;
        format!("{}{}{}", c.name, rule, c.reset)
    }

    fn format_at(&self, at: Position) -> String {
        let c = &self.colors;
        format!("{}@{}{}", c.meta, at, c.reset)
    }

    fn format_span(&self, span: Span) -> String {
        let c = &self.colors;
        let mut out = format!("{}{}{}", c.meta, span, c.reset);
        if self.verbosity >= Verbosity::Verbose {
            let text = truncate_text(span.text(self.source), MAX_TEXT);
            out.push_str(&format!(" {}\"{}\"{}", c.text, text, c.reset));
        }
        out
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_enter(&mut self, rule: &str, at: Position) {
        let content = format!("{} {}", self.format_rule(rule), self.format_at(at));
        self.push(symbol::ENTER, content);
        self.depth += 1;
    }

    fn trace_exit(&mut self, rule: &str, matched: Option<Span>) {
        self.depth = self.depth.saturating_sub(1);
        match matched {
            Some(span) => {
                let content = format!("{} {}", self.format_rule(rule), self.format_span(span));
                self.push(symbol::MATCH, content);
            }
            None => {
                let c = self.colors;
                let content = format!("{}{}{}", c.failure, rule, c.reset);
                self.push(symbol::NO_MATCH, content);
            }
        }
    }

    fn trace_unwind(&mut self, rule: &str) {
        self.depth = self.depth.saturating_sub(1);
        let content = self.format_rule(rule);
        self.push(symbol::UNWIND, content);
    }

    fn trace_seed(&mut self, rule: &str, at: Position) {
        let content = format!("{} {}", self.format_rule(rule), self.format_at(at));
        self.push(symbol::SEED, content);
    }

    fn trace_grow(&mut self, rule: &str, span: Span) {
        let content = format!("{} {}", self.format_rule(rule), self.format_span(span));
        self.push(symbol::GROW, content);
    }

    fn trace_memo(&mut self, rule: &str, matched: Option<Span>) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let content = match matched {
            Some(span) => format!("{} {}", self.format_rule(rule), self.format_span(span)),
            None => {
                let c = self.colors;
                format!("{}{}{}", c.failure, rule, c.reset)
            }
        };
        self.push(symbol::MEMO, content);
    }

    fn trace_backtrack(&mut self, to: Position) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let c = self.colors;
        self.push(symbol::BACKTRACK, format!("{}{}{}", c.meta, to, c.reset));
    }

    fn trace_failure(&mut self, error: &ParseError) {
        if self.verbosity < Verbosity::VeryVerbose {
            return;
        }
        let c = self.colors;
        self.push(symbol::FAILURE, format!("{}{}{}", c.failure, error, c.reset));
    }
}

/// Builder for [`PrintTracer`].
pub struct PrintTracerBuilder<'s> {
    source: &'s str,
    verbosity: Verbosity,
    colored: bool,
}

impl<'s> PrintTracerBuilder<'s> {
    pub fn verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn build(self) -> PrintTracer<'s> {
        PrintTracer {
            source: self.source,
            verbosity: self.verbosity,
            lines: Vec::new(),
            depth: 0,
            colors: Colors::new(self.colored),
        }
    }
}
