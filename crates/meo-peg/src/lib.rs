//! Meo: PEG parsing with left recursion and typed ASTs.
//!
//! Grammars are built from [`Expr`] combinators. Rules may be left-recursive,
//! directly or through other rules. Binding a rule to a node type makes every
//! successful match of that rule produce a node.
//!
//! # Example
//!
//! ```
//! use meo_peg::ast::{AstPtr, AstSel};
//! use meo_peg::{AstNode, Grammar, Parser, Span, range};
//!
//! #[derive(Debug, Default, AstNode)]
//! struct Num {
//!     span: Span,
//! }
//!
//! #[derive(Debug, Default, AstNode)]
//! struct Add {
//!     span: Span,
//!     lhs: AstSel<true, (Num, Add)>,
//!     rhs: AstPtr<true, Num>,
//! }
//!
//! let mut g = Grammar::new();
//! let num = g.add("num", range('0', '9').many1());
//! let exp = g.rule("exp");
//! let add = g.add("add", exp >> '+' >> num);
//! g.define(exp, add | num);
//! g.bind::<Num>(num);
//! g.bind::<Add>(add);
//!
//! let source = "1+2+3";
//! let tree = Parser::new(&g).parse(source, exp).unwrap();
//! let top = tree.to::<Add>();
//! assert_eq!(top.rhs.node().span.text(source), "3");
//! assert!(top.lhs.is::<Add>());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate self as meo_peg;

pub mod ast;
pub mod diagnostics;
pub mod engine;

mod charset;
mod error;
mod expr;
mod grammar;
mod invariants;
mod parser;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod parser_tests;

pub use meo_core::{Colors, Position, Span};
/// Derive macro for [`ast::AstNode`].
pub use meo_peg_macros::AstNode;

pub use ast::{AstNode, Node};

pub use charset::CharSet;
pub use diagnostics::ErrorsPrinter;
pub use engine::{Context, ParseLimits, RuntimeError, UserItem};
pub use error::{Error, ErrorKind, ErrorMessages, Errors, ParseError, Result};
pub use expr::{
    Expr, UserHandler, and_, any, ch, choice, class, eof, false_, lit, many, many1, nl, not_, opt,
    range, repeat, seq, set, term, true_, user,
};
pub use grammar::{Grammar, Rule};
pub use parser::{Parser, parse};
