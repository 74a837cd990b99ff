//! Node types of the Meo expression subset.

use meo_peg::ast::{AstPtr, AstSel, AstSelList};
use meo_peg::{AstNode, Span};

/// Any expression node.
pub type Exp = (Num, Str, Variable, Binary, Unary, Call, Parens);

/// Any statement node.
pub type Stat = (Assign, ExpStat);

/// Callable expressions: a call result, a variable or a parenthesized
/// expression.
pub type Callee = (Variable, Call, Parens);

#[derive(Debug, Default, AstNode)]
pub struct Num {
    pub span: Span,
}

impl Num {
    pub fn value(&self, source: &str) -> Option<f64> {
        self.span.text(source).parse().ok()
    }
}

/// String literal, quotes included in the span.
#[derive(Debug, Default, AstNode)]
pub struct Str {
    pub span: Span,
}

impl Str {
    /// Text between the quotes, escapes untouched.
    pub fn content<'s>(&self, source: &'s str) -> &'s str {
        let text = self.span.text(source);
        text.get(1..text.len().saturating_sub(1)).unwrap_or_default()
    }
}

#[derive(Debug, Default, AstNode)]
pub struct Name {
    pub span: Span,
}

/// Operator token of a [`Binary`] or [`Unary`].
#[derive(Debug, Default, AstNode)]
pub struct Op {
    pub span: Span,
}

#[derive(Debug, Default, AstNode)]
pub struct Variable {
    pub span: Span,
    pub name: AstPtr<true, Name>,
}

#[derive(Debug, Default, AstNode)]
pub struct Binary {
    pub span: Span,
    pub lhs: AstSel<true, Exp>,
    pub op: AstPtr<true, Op>,
    pub rhs: AstSel<true, Exp>,
}

#[derive(Debug, Default, AstNode)]
pub struct Unary {
    pub span: Span,
    pub op: AstPtr<true, Op>,
    pub operand: AstSel<true, Exp>,
}

#[derive(Debug, Default, AstNode)]
pub struct Parens {
    pub span: Span,
    pub inner: AstSel<true, Exp>,
}

/// Parenthesized argument list of a [`Call`].
#[derive(Debug, Default, AstNode)]
pub struct Args {
    pub span: Span,
    pub items: AstSelList<false, Exp>,
}

#[derive(Debug, Default, AstNode)]
pub struct Call {
    pub span: Span,
    pub callee: AstSel<true, Callee>,
    pub args: AstPtr<true, Args>,
}

#[derive(Debug, Default, AstNode)]
pub struct Assign {
    pub span: Span,
    pub target: AstPtr<true, Variable>,
    pub value: AstSel<true, Exp>,
}

#[derive(Debug, Default, AstNode)]
pub struct ExpStat {
    pub span: Span,
    pub value: AstSel<true, Exp>,
}

#[derive(Debug, Default, AstNode)]
pub struct Block {
    pub span: Span,
    pub stats: AstSelList<true, Stat>,
}
