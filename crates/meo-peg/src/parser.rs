//! Whole-input parsing entry points.

use std::any::Any;

use crate::ast::{ConstructError, Node, NodeType};
use crate::engine::{Context, NoopTracer, ParseLimits, RuntimeError, Tracer};
use crate::error::{Error, Result};
use crate::{Grammar, Position, Rule, Span};

/// Parses whole inputs with one grammar.
///
/// ```
/// use meo_peg::{AstNode, Grammar, Parser, Span, range};
///
/// #[derive(Debug, Default, AstNode)]
/// struct Digits {
///     span: Span,
/// }
///
/// let mut g = Grammar::new();
/// let digits = g.add("digits", range('0', '9').many1());
/// g.bind::<Digits>(digits);
///
/// let node = Parser::new(&g).parse("2024", digits).unwrap();
/// assert_eq!(node.text("2024"), "2024");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Parser<'g> {
    grammar: &'g Grammar,
    limits: ParseLimits,
}

impl<'g> Parser<'g> {
    /// # Panics
    /// If the grammar declares rules it never defines.
    pub fn new(grammar: &'g Grammar) -> Self {
        grammar.ensure_complete();
        Self {
            grammar,
            limits: ParseLimits::default(),
        }
    }

    pub fn limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.limits.exec_fuel = fuel;
        self
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.limits.recursion_limit = limit;
        self
    }

    pub fn nesting_limit(mut self, limit: u32) -> Self {
        self.limits.nesting_limit = limit;
        self
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    /// Match all of `input` against `start` and build the tree.
    pub fn parse(&self, input: &str, start: Rule) -> Result<Node> {
        self.parse_traced(input, start, None, &mut NoopTracer)
    }

    /// Like [`parse`](Self::parse), requiring the root to be a `T`.
    pub fn parse_as<T: NodeType>(&self, input: &str, start: Rule) -> Result<Box<T>> {
        let root = self.parse(input, start)?;
        let found = root.name();
        root.downcast::<T>().ok_or_else(|| {
            Error::Construct(ConstructError::RootType {
                expected: T::NAME,
                found,
            })
        })
    }

    /// Like [`parse`](Self::parse), handing `state` to `user(..)` handlers.
    pub fn parse_with_state(
        &self,
        input: &str,
        start: Rule,
        state: &mut (dyn Any + 'static),
    ) -> Result<Node> {
        self.parse_traced(input, start, Some(state), &mut NoopTracer)
    }

    pub fn parse_traced<T: Tracer>(
        &self,
        input: &str,
        start: Rule,
        state: Option<&mut (dyn Any + 'static)>,
        tracer: &mut T,
    ) -> Result<Node> {
        let context = self.accept(input, start, state, tracer)?;
        Ok(context.build()?)
    }

    /// Match all of `input` against `start` without building a tree.
    pub fn recognize(&self, input: &str, start: Rule) -> Result<Span> {
        let context = self.accept(input, start, None, &mut NoopTracer)?;
        Ok(Span::new(Position::START, context.position()))
    }

    fn accept<'i, T: Tracer>(
        &self,
        input: &'i str,
        start: Rule,
        state: Option<&'i mut (dyn Any + 'static)>,
        tracer: &mut T,
    ) -> Result<Context<'i>>
    where
        'g: 'i,
    {
        let mut context = Context::new(self.grammar, input).limits(self.limits);
        if let Some(state) = state {
            context = context.with_state(state);
        }

        match context.eval_rule_traced(start, tracer) {
            Ok(_) if context.at_eof() => Ok(context),
            Ok(_) => {
                context.report_unexpected();
                Err(Error::Syntax(context.into_errors()))
            }
            Err(RuntimeError::NoMatch) => Err(Error::Syntax(context.into_errors())),
            Err(err) => Err(err.into()),
        }
    }
}

/// Parse `input` with a default [`Parser`] over `grammar`.
pub fn parse(grammar: &Grammar, input: &str, start: Rule) -> Result<Node> {
    Parser::new(grammar).parse(input, start)
}
