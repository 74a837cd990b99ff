//! Grammar expressions and their composition operators.
//!
//! An [`Expr`] is an immutable, cheaply clonable tree of PEG operators.
//! Composition never evaluates anything; a [`Context`](crate::Context)
//! walks the tree later.
//!
//! | PEG          | Rust                                |
//! |--------------|-------------------------------------|
//! | `a b`        | `a >> b`                            |
//! | `a / b`      | `a \| b`                            |
//! | `a*`         | `many(a)` or `a.many()`             |
//! | `a+`         | `many1(a)` or `a.many1()`           |
//! | `a?`         | `-a`, `opt(a)` or `a.opt()`         |
//! | `&a`         | `and_(a)`                           |
//! | `!a`         | `!a` or `not_(a)`                   |
//! | `.`          | `any()`                             |
//! | `[a-z]`      | `range('a', 'z')`, `set("abc")`     |

use std::fmt;
use std::ops::{BitOr, Neg, Not, Shr};
use std::sync::Arc;

use crate::CharSet;
use crate::engine::UserItem;
use crate::grammar::Rule;

/// Callback for [`user`] expressions. Returning `false` vetoes the match.
pub type UserHandler = Arc<dyn Fn(&mut UserItem<'_>) -> bool + Send + Sync>;

#[derive(Clone)]
pub struct Expr(Arc<ExprKind>);

pub(crate) enum ExprKind {
    Char(char),
    Literal(Box<str>),
    Set(CharSet),
    Rule(Rule),
    Seq(Vec<Expr>),
    Choice(Vec<Expr>),
    Repeat {
        expr: Expr,
        min: u32,
        max: Option<u32>,
    },
    And(Expr),
    Not(Expr),
    Term(Expr),
    Newline(Expr),
    User(Expr, UserHandler),
    Eof,
    Any,
    True,
    False,
}

impl Expr {
    fn new(kind: ExprKind) -> Self {
        Self(Arc::new(kind))
    }

    pub(crate) fn kind(&self) -> &ExprKind {
        &self.0
    }

    /// Zero or more repetitions.
    pub fn many(self) -> Expr {
        self.repeat(0, None)
    }

    /// One or more repetitions.
    pub fn many1(self) -> Expr {
        self.repeat(1, None)
    }

    /// Zero or one occurrence.
    pub fn opt(self) -> Expr {
        self.repeat(0, Some(1))
    }

    /// Between `min` and `max` repetitions (`None` = unbounded).
    pub fn repeat(self, min: u32, max: Option<u32>) -> Expr {
        Expr::new(ExprKind::Repeat {
            expr: self,
            min,
            max,
        })
    }

    /// Skip trailing trivia after a successful match.
    pub fn term(self) -> Expr {
        Expr::new(ExprKind::Term(self))
    }

    /// Start a new line after a successful match.
    pub fn nl(self) -> Expr {
        Expr::new(ExprKind::Newline(self))
    }

    /// Run `handler` after a successful match.
    pub fn user<F>(self, handler: F) -> Expr
    where
        F: Fn(&mut UserItem<'_>) -> bool + Send + Sync + 'static,
    {
        Expr::new(ExprKind::User(self, Arc::new(handler)))
    }

    /// Rule referenced by this expression, if it is a bare rule reference.
    pub fn as_rule(&self) -> Option<Rule> {
        match self.kind() {
            ExprKind::Rule(rule) => Some(*rule),
            _ => None,
        }
    }

    pub(crate) fn write(
        &self,
        f: &mut fmt::Formatter<'_>,
        names: &dyn Fn(Rule) -> String,
    ) -> fmt::Result {
        match self.kind() {
            ExprKind::Char(c) => write!(f, "{c:?}"),
            ExprKind::Literal(s) => write!(f, "{s:?}"),
            ExprKind::Set(set) => write!(f, "{set}"),
            ExprKind::Rule(rule) => f.write_str(&names(*rule)),
            ExprKind::Seq(items) => write_joined(f, items, " ", names, Expr::write_operand),
            ExprKind::Choice(alts) => write_joined(f, alts, " / ", names, Expr::write),
            ExprKind::Repeat { expr, min, max } => {
                expr.write_operand(f, names)?;
                match (min, max) {
                    (0, None) => f.write_str("*"),
                    (1, None) => f.write_str("+"),
                    (0, Some(1)) => f.write_str("?"),
                    (min, None) => write!(f, "{{{min},}}"),
                    (min, Some(max)) => write!(f, "{{{min},{max}}}"),
                }
            }
            ExprKind::And(e) => {
                f.write_str("&")?;
                e.write_operand(f, names)
            }
            ExprKind::Not(e) => {
                f.write_str("!")?;
                e.write_operand(f, names)
            }
            ExprKind::Term(e) => write_call(f, "term", e, names),
            ExprKind::Newline(e) => write_call(f, "nl", e, names),
            ExprKind::User(e, _) => write_call(f, "user", e, names),
            ExprKind::Eof => f.write_str("eof"),
            ExprKind::Any => f.write_str("."),
            ExprKind::True => f.write_str("true"),
            ExprKind::False => f.write_str("false"),
        }
    }

    fn write_operand(
        &self,
        f: &mut fmt::Formatter<'_>,
        names: &dyn Fn(Rule) -> String,
    ) -> fmt::Result {
        if matches!(self.kind(), ExprKind::Seq(_) | ExprKind::Choice(_)) {
            f.write_str("(")?;
            self.write(f, names)?;
            f.write_str(")")
        } else {
            self.write(f, names)
        }
    }
}

type WriteItem = fn(&Expr, &mut fmt::Formatter<'_>, &dyn Fn(Rule) -> String) -> fmt::Result;

fn write_joined(
    f: &mut fmt::Formatter<'_>,
    items: &[Expr],
    sep: &str,
    names: &dyn Fn(Rule) -> String,
    write_item: WriteItem,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write_item(item, f, names)?;
    }
    Ok(())
}

fn write_call(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    inner: &Expr,
    names: &dyn Fn(Rule) -> String,
) -> fmt::Result {
    write!(f, "{name}(")?;
    inner.write(f, names)?;
    f.write_str(")")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, &|rule| format!("<{}>", rule.index()))
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({self})")
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// Match one character.
pub fn ch(c: char) -> Expr {
    Expr::new(ExprKind::Char(c))
}

/// Match a literal string.
pub fn lit(s: &str) -> Expr {
    Expr::new(ExprKind::Literal(s.into()))
}

/// Match one character out of `chars`.
pub fn set(chars: &str) -> Expr {
    Expr::new(ExprKind::Set(CharSet::from_chars(chars)))
}

/// Match one character in `min..=max`.
pub fn range(min: char, max: char) -> Expr {
    Expr::new(ExprKind::Set(CharSet::from_range(min, max)))
}

/// Match one character of a prebuilt class.
pub fn class(set: CharSet) -> Expr {
    Expr::new(ExprKind::Set(set))
}

/// Succeed only at the end of input.
pub fn eof() -> Expr {
    Expr::new(ExprKind::Eof)
}

/// Match any one character.
pub fn any() -> Expr {
    Expr::new(ExprKind::Any)
}

/// Always succeed without consuming input.
pub fn true_() -> Expr {
    Expr::new(ExprKind::True)
}

/// Always fail.
pub fn false_() -> Expr {
    Expr::new(ExprKind::False)
}

pub fn many(e: impl Into<Expr>) -> Expr {
    e.into().many()
}

pub fn many1(e: impl Into<Expr>) -> Expr {
    e.into().many1()
}

pub fn opt(e: impl Into<Expr>) -> Expr {
    e.into().opt()
}

pub fn repeat(e: impl Into<Expr>, min: u32, max: Option<u32>) -> Expr {
    e.into().repeat(min, max)
}

/// Positive lookahead: succeed without consuming if `e` matches.
pub fn and_(e: impl Into<Expr>) -> Expr {
    Expr::new(ExprKind::And(e.into()))
}

/// Negative lookahead: succeed without consuming if `e` does not match.
pub fn not_(e: impl Into<Expr>) -> Expr {
    Expr::new(ExprKind::Not(e.into()))
}

/// Match `e`, then skip trivia using the grammar's skip expression.
pub fn term(e: impl Into<Expr>) -> Expr {
    e.into().term()
}

/// Match `e`, then advance the line counter and reset the column.
pub fn nl(e: impl Into<Expr>) -> Expr {
    e.into().nl()
}

/// Match `e`, then let `handler` accept or veto the match.
pub fn user<F>(e: impl Into<Expr>, handler: F) -> Expr
where
    F: Fn(&mut UserItem<'_>) -> bool + Send + Sync + 'static,
{
    e.into().user(handler)
}

/// Sequence of expressions; `seq([])` always succeeds.
pub fn seq<I>(items: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    items
        .into_iter()
        .map(Into::into)
        .reduce(sequence)
        .unwrap_or_else(true_)
}

/// Ordered choice; `choice([])` always fails.
pub fn choice<I>(items: I) -> Expr
where
    I: IntoIterator,
    I::Item: Into<Expr>,
{
    items
        .into_iter()
        .map(Into::into)
        .reduce(alternation)
        .unwrap_or_else(false_)
}

fn sequence(lhs: Expr, rhs: Expr) -> Expr {
    let mut items = flatten(lhs, |k| matches!(k, ExprKind::Seq(_)));
    items.extend(flatten(rhs, |k| matches!(k, ExprKind::Seq(_))));
    Expr::new(ExprKind::Seq(items))
}

fn alternation(lhs: Expr, rhs: Expr) -> Expr {
    let mut items = flatten(lhs, |k| matches!(k, ExprKind::Choice(_)));
    items.extend(flatten(rhs, |k| matches!(k, ExprKind::Choice(_))));
    Expr::new(ExprKind::Choice(items))
}

fn flatten(expr: Expr, same: impl Fn(&ExprKind) -> bool) -> Vec<Expr> {
    if same(expr.kind()) {
        match expr.kind() {
            ExprKind::Seq(items) | ExprKind::Choice(items) => return items.clone(),
            _ => {}
        }
    }
    vec![expr]
}

// ============================================================================
// Conversions
// ============================================================================

impl From<char> for Expr {
    fn from(c: char) -> Self {
        ch(c)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        lit(s)
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        lit(&s)
    }
}

impl From<&Expr> for Expr {
    fn from(e: &Expr) -> Self {
        e.clone()
    }
}

impl From<Rule> for Expr {
    fn from(rule: Rule) -> Self {
        Expr::new(ExprKind::Rule(rule))
    }
}

impl From<CharSet> for Expr {
    fn from(set: CharSet) -> Self {
        class(set)
    }
}

// ============================================================================
// Operators
// ============================================================================

macro_rules! impl_operators {
    ($($lhs:ty),*) => {
        $(
            impl<R: Into<Expr>> Shr<R> for $lhs {
                type Output = Expr;
                fn shr(self, rhs: R) -> Expr {
                    sequence(self.into(), rhs.into())
                }
            }

            impl<R: Into<Expr>> BitOr<R> for $lhs {
                type Output = Expr;
                fn bitor(self, rhs: R) -> Expr {
                    alternation(self.into(), rhs.into())
                }
            }

            impl Not for $lhs {
                type Output = Expr;
                fn not(self) -> Expr {
                    not_(self)
                }
            }

            impl Neg for $lhs {
                type Output = Expr;
                fn neg(self) -> Expr {
                    opt(self)
                }
            }
        )*
    };
}

impl_operators!(Expr, Rule);

// Literal on the left: `'(' >> exp`, `"if" | keyword`.
macro_rules! impl_literal_lhs {
    ($($lhs:ty),*) => {
        $(
            impl Shr<Expr> for $lhs {
                type Output = Expr;
                fn shr(self, rhs: Expr) -> Expr {
                    sequence(self.into(), rhs)
                }
            }

            impl Shr<Rule> for $lhs {
                type Output = Expr;
                fn shr(self, rhs: Rule) -> Expr {
                    sequence(self.into(), rhs.into())
                }
            }

            impl BitOr<Expr> for $lhs {
                type Output = Expr;
                fn bitor(self, rhs: Expr) -> Expr {
                    alternation(self.into(), rhs)
                }
            }

            impl BitOr<Rule> for $lhs {
                type Output = Expr;
                fn bitor(self, rhs: Rule) -> Expr {
                    alternation(self.into(), rhs.into())
                }
            }
        )*
    };
}

impl_literal_lhs!(char, &str);
