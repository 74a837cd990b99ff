//! Expression evaluation.
//!
//! Every evaluator returns `Ok(true)` on a match and `Ok(false)` on a
//! failure. A failure leaves the position and the match log as they were on
//! entry; `Err` unwinds without restoring anything.

use super::seed::SeedKey;
use super::trace::Tracer;
use super::{Context, RuntimeError, UserItem};
use crate::error::{ErrorKind, ParseError};
use crate::expr::{ExprKind, UserHandler};
use crate::{Expr, Span};

pub(crate) type Eval = Result<bool, Interrupt>;

/// Non-local exits of evaluation.
#[derive(Debug)]
pub(crate) enum Interrupt {
    /// A left-recursive rule finished growing. Unwinds to the invocation
    /// that owns the key, which then succeeds with the grown match.
    Grown(SeedKey),
    Fatal(RuntimeError),
}

impl Context<'_> {
    pub(super) fn eval_expr<T: Tracer>(&mut self, expr: &Expr, tracer: &mut T) -> Eval {
        self.consume_fuel()?;
        self.enter_nesting()?;
        let result = self.eval_kind(expr, tracer);
        self.nesting -= 1;
        result
    }

    fn eval_kind<T: Tracer>(&mut self, expr: &Expr, tracer: &mut T) -> Eval {
        match expr.kind() {
            ExprKind::Char(expected) => Ok(self.match_char(|ch| ch == *expected, tracer)),
            ExprKind::Literal(text) => Ok(self.match_literal(text, tracer)),
            ExprKind::Set(set) => Ok(self.match_char(|ch| set.contains(ch), tracer)),
            ExprKind::Any => Ok(self.match_char(|_| true, tracer)),
            ExprKind::Rule(rule) => self.eval_rule_ref(*rule, tracer),
            ExprKind::Seq(items) => self.eval_seq(items, tracer),
            ExprKind::Choice(alts) => self.eval_choice(alts, tracer),
            ExprKind::Repeat { expr, min, max } => self.eval_repeat(expr, *min, *max, tracer),
            ExprKind::And(inner) => self.eval_lookahead(inner, true, tracer),
            ExprKind::Not(inner) => self.eval_lookahead(inner, false, tracer),
            ExprKind::Term(inner) => self.eval_term(inner, tracer),
            ExprKind::Newline(inner) => {
                let matched = self.eval_expr(inner, tracer)?;
                if matched {
                    self.position.newline();
                }
                Ok(matched)
            }
            ExprKind::User(inner, handler) => self.eval_user(inner, handler, tracer),
            ExprKind::Eof => {
                if self.at_eof() {
                    return Ok(true);
                }
                self.fail(self.next_char_span(), ErrorKind::Syntax, tracer);
                Ok(false)
            }
            ExprKind::True => Ok(true),
            ExprKind::False => {
                self.fail(Span::empty(self.position), ErrorKind::Syntax, tracer);
                Ok(false)
            }
        }
    }

    pub(super) fn fail<T: Tracer>(&mut self, span: Span, kind: ErrorKind, tracer: &mut T) {
        let error = ParseError::new(span, kind);
        tracer.trace_failure(&error);
        self.errors.push(error);
    }

    fn match_char<T: Tracer>(&mut self, accept: impl Fn(char) -> bool, tracer: &mut T) -> bool {
        let Some(ch) = self.remaining().chars().next() else {
            self.fail(Span::empty(self.position), ErrorKind::InvalidEof, tracer);
            return false;
        };
        if !accept(ch) {
            self.fail(self.next_char_span(), ErrorKind::Syntax, tracer);
            return false;
        }
        self.position.advance(ch);
        true
    }

    fn match_literal<T: Tracer>(&mut self, text: &str, tracer: &mut T) -> bool {
        let mut cursor = self.position;
        for expected in text.chars() {
            let next = self
                .input
                .get(cursor.offset..)
                .and_then(|rest| rest.chars().next());
            match next {
                Some(ch) if ch == expected => cursor.advance(ch),
                Some(ch) => {
                    let mut end = cursor;
                    end.advance(ch);
                    self.fail(Span::new(cursor, end), ErrorKind::Syntax, tracer);
                    return false;
                }
                None => {
                    self.fail(Span::empty(cursor), ErrorKind::InvalidEof, tracer);
                    return false;
                }
            }
        }
        self.position = cursor;
        true
    }

    fn eval_seq<T: Tracer>(&mut self, items: &[Expr], tracer: &mut T) -> Eval {
        let start = self.checkpoint();
        for item in items {
            if !self.eval_expr(item, tracer)? {
                self.restore(start);
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn eval_choice<T: Tracer>(&mut self, alts: &[Expr], tracer: &mut T) -> Eval {
        for (i, alt) in alts.iter().enumerate() {
            if self.eval_expr(alt, tracer)? {
                return Ok(true);
            }
            if i + 1 < alts.len() {
                tracer.trace_backtrack(self.position);
            }
        }
        Ok(false)
    }

    fn eval_repeat<T: Tracer>(
        &mut self,
        expr: &Expr,
        min: u32,
        max: Option<u32>,
        tracer: &mut T,
    ) -> Eval {
        let start = self.checkpoint();
        let mut count = 0u32;
        while max.is_none_or(|max| count < max) {
            let before = self.position.offset;
            if !self.eval_expr(expr, tracer)? {
                break;
            }
            count += 1;
            if self.position.offset == before {
                // A body that matched empty matches empty again.
                count = count.max(min);
                break;
            }
        }
        if count < min {
            self.restore(start);
            return Ok(false);
        }
        Ok(true)
    }

    fn eval_lookahead<T: Tracer>(&mut self, expr: &Expr, positive: bool, tracer: &mut T) -> Eval {
        let start = self.checkpoint();
        let matched = self.eval_expr(expr, tracer)?;
        let end = self.position;
        self.restore(start);
        if matched == positive {
            return Ok(true);
        }
        if matched {
            // `!e` where `e` matched: the match itself is the offending text.
            self.fail(Span::new(start.position, end), ErrorKind::Syntax, tracer);
        }
        Ok(false)
    }

    fn eval_term<T: Tracer>(&mut self, expr: &Expr, tracer: &mut T) -> Eval {
        if !self.eval_expr(expr, tracer)? {
            return Ok(false);
        }
        self.skip_trivia(tracer)?;
        Ok(true)
    }

    fn skip_trivia<T: Tracer>(&mut self, tracer: &mut T) -> Result<(), Interrupt> {
        if self.skipping {
            return Ok(());
        }
        let grammar = self.grammar;
        let Some(skip) = grammar.skip() else {
            return Ok(());
        };

        self.skipping = true;
        let outcome = self.skip_repeatedly(skip, tracer);
        self.skipping = false;
        outcome
    }

    fn skip_repeatedly<T: Tracer>(&mut self, skip: &Expr, tracer: &mut T) -> Result<(), Interrupt> {
        loop {
            let before = self.position.offset;
            if !self.eval_expr(skip, tracer)? || self.position.offset == before {
                return Ok(());
            }
        }
    }

    fn eval_user<T: Tracer>(
        &mut self,
        expr: &Expr,
        handler: &UserHandler,
        tracer: &mut T,
    ) -> Eval {
        let start = self.checkpoint();
        if !self.eval_expr(expr, tracer)? {
            return Ok(false);
        }

        let span = Span::new(start.position, self.position);
        let mut item = UserItem::new(span, self.input, self.state.as_deref_mut(), &mut self.errors);
        let accepted = handler(&mut item);
        let reported = item.reported();
        if accepted {
            return Ok(true);
        }

        self.restore(start);
        if !reported {
            self.fail(span, ErrorKind::Syntax, tracer);
        }
        Ok(false)
    }
}
