//! Parse context: all state of one parse run.

use std::any::Any;

use super::checkpoint::Checkpoint;
use super::matches::MatchLog;
use super::seed::{MemoTable, SeedKey, SeedTable};
use super::trace::{NoopTracer, Tracer};
use super::{Interrupt, Match, RuntimeError};
use crate::ast::{AstBuilder, ConstructError, Node};
use crate::error::{ErrorKind, Errors, ParseError};
use crate::{Expr, Grammar, Position, Rule, Span};

/// Runtime limits for one parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum expression evaluations (default: 10,000,000).
    pub exec_fuel: u32,
    /// Maximum nested rule invocations (default: 1,024).
    pub recursion_limit: u32,
    /// Maximum nested expression evaluations (default: 1,024). Evaluation
    /// recurses on the native stack; the default fits a 2 MiB thread stack
    /// in unoptimized builds.
    pub nesting_limit: u32,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 10_000_000,
            recursion_limit: 1024,
            nesting_limit: 1024,
        }
    }
}

impl ParseLimits {
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn nesting_limit(mut self, limit: u32) -> Self {
        self.nesting_limit = limit;
        self
    }
}

/// An active rule invocation.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Frame {
    pub(crate) key: SeedKey,
    pub(crate) start: Checkpoint,
}

/// State of one parse over one input.
///
/// Owns everything that changes while parsing, so a [`Grammar`] can be
/// shared by any number of contexts.
pub struct Context<'a> {
    pub(crate) grammar: &'a Grammar,
    pub(crate) input: &'a str,
    pub(crate) position: Position,
    pub(crate) matches: MatchLog,
    pub(crate) errors: Vec<ParseError>,
    pub(crate) seeds: SeedTable,
    pub(crate) memo: MemoTable,
    pub(crate) frames: Vec<Frame>,
    /// Index of the outermost frame whose seed state the running
    /// invocation has observed. `usize::MAX` when it observed none.
    pub(crate) dependency: usize,
    pub(crate) limits: ParseLimits,
    pub(crate) fuel_used: u32,
    /// Nested `eval_expr` calls.
    pub(crate) nesting: u32,
    /// Inside the skip expression of `term`.
    pub(crate) skipping: bool,
    pub(crate) state: Option<&'a mut (dyn Any + 'static)>,
}

impl<'a> Context<'a> {
    pub fn new(grammar: &'a Grammar, input: &'a str) -> Self {
        Self {
            grammar,
            input,
            position: Position::START,
            matches: MatchLog::default(),
            errors: Vec::new(),
            seeds: SeedTable::default(),
            memo: MemoTable::default(),
            frames: Vec::new(),
            dependency: usize::MAX,
            limits: ParseLimits::default(),
            fuel_used: 0,
            nesting: 0,
            skipping: false,
            state: None,
        }
    }

    pub fn limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// User state handed to `user(..)` handlers.
    pub fn with_state(mut self, state: &'a mut (dyn Any + 'static)) -> Self {
        self.state = Some(state);
        self
    }

    pub fn grammar(&self) -> &'a Grammar {
        self.grammar
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Unconsumed input.
    pub fn remaining(&self) -> &'a str {
        self.input.get(self.position.offset..).unwrap_or("")
    }

    pub fn at_eof(&self) -> bool {
        self.position.offset >= self.input.len()
    }

    pub fn matches(&self) -> &[Match] {
        self.matches.as_slice()
    }

    /// Candidate errors in the order they were recorded.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Evaluate `rule` at the current position.
    ///
    /// On success the position is past the match and the matches of bound
    /// rules are logged. On failure position and log are unchanged.
    pub fn eval_rule(&mut self, rule: Rule) -> Result<Position, RuntimeError> {
        self.eval_rule_traced(rule, &mut NoopTracer)
    }

    pub fn eval_rule_traced<T: Tracer>(
        &mut self,
        rule: Rule,
        tracer: &mut T,
    ) -> Result<Position, RuntimeError> {
        let start = self.checkpoint();
        let outcome = self.eval_rule_ref(rule, tracer);
        if self.finish(outcome, start)? {
            Ok(self.position)
        } else {
            Err(RuntimeError::NoMatch)
        }
    }

    /// Evaluate a free-standing expression at the current position.
    pub fn eval(&mut self, expr: &Expr) -> Result<bool, RuntimeError> {
        self.eval_traced(expr, &mut NoopTracer)
    }

    pub fn eval_traced<T: Tracer>(
        &mut self,
        expr: &Expr,
        tracer: &mut T,
    ) -> Result<bool, RuntimeError> {
        let start = self.checkpoint();
        let outcome = self.eval_expr(expr, tracer);
        self.finish(outcome, start)
    }

    fn finish(
        &mut self,
        outcome: Result<bool, Interrupt>,
        start: Checkpoint,
    ) -> Result<bool, RuntimeError> {
        match outcome {
            Ok(matched) => Ok(matched),
            Err(Interrupt::Fatal(err)) => {
                self.restore(start);
                self.frames.clear();
                self.dependency = usize::MAX;
                self.nesting = 0;
                Err(err)
            }
            Err(Interrupt::Grown(key)) => Self::ensure_no_growth(key),
        }
    }

    /// Record a syntax error at the next unconsumed character.
    pub fn report_unexpected(&mut self) {
        let span = self.next_char_span();
        let kind = if span.is_empty() {
            ErrorKind::InvalidEof
        } else {
            ErrorKind::Syntax
        };
        self.errors.push(ParseError::new(span, kind));
    }

    /// Sorted candidate errors. Never empty: a parse that failed without
    /// recording anything reports the current position.
    pub fn into_errors(mut self) -> Errors {
        if self.errors.is_empty() {
            self.report_unexpected();
        }
        Errors::new(self.errors)
    }

    /// Replay the match log into a tree.
    pub fn build(&self) -> Result<Node, ConstructError> {
        AstBuilder::new(self.grammar).build(self.matches.as_slice())
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            match_watermark: self.matches.len(),
        }
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
        self.matches.truncate(checkpoint.match_watermark);
    }

    pub(crate) fn next_char_span(&self) -> Span {
        let mut end = self.position;
        if let Some(ch) = self.remaining().chars().next() {
            end.advance(ch);
        }
        Span::new(self.position, end)
    }

    pub(crate) fn consume_fuel(&mut self) -> Result<(), Interrupt> {
        if self.fuel_used >= self.limits.exec_fuel {
            return Err(Interrupt::Fatal(RuntimeError::ExecFuelExhausted(
                self.limits.exec_fuel,
            )));
        }
        self.fuel_used += 1;
        Ok(())
    }

    pub(crate) fn enter_nesting(&mut self) -> Result<(), Interrupt> {
        let limit = self.limits.nesting_limit;
        if self.nesting >= limit {
            return Err(Interrupt::Fatal(RuntimeError::RecursionLimitExceeded(limit)));
        }
        self.nesting += 1;
        Ok(())
    }
}
