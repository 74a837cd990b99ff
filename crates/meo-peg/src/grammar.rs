//! Rule arena.
//!
//! Rules are declared by name before they are defined so that expressions
//! can reference each other (and themselves) freely:
//!
//! ```
//! use meo_peg::{Grammar, range};
//!
//! let mut g = Grammar::new();
//! let digit = g.add("digit", range('0', '9'));
//! let sum = g.rule("sum");
//! g.define(sum, sum >> '+' >> digit | digit);
//! assert_eq!(g.name(sum), "sum");
//! ```

use std::fmt;

use indexmap::IndexMap;

use crate::Expr;
use crate::ast::{Action, NodeType, build_node};

/// Handle to a rule of a [`Grammar`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rule(u32);

impl Rule {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
pub(crate) struct RuleDef {
    pub(crate) name: String,
    pub(crate) expr: Option<Expr>,
    pub(crate) action: Option<Action>,
    pub(crate) node: Option<&'static str>,
}

/// A set of named rules plus the trivia expression used by `term`.
///
/// Immutable once parsing starts; `Send + Sync`, so one grammar can serve
/// any number of concurrent parses.
#[derive(Debug, Default)]
pub struct Grammar {
    rules: Vec<RuleDef>,
    names: IndexMap<String, Rule>,
    skip: Option<Expr>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a rule, or return the existing rule with that name.
    pub fn rule(&mut self, name: &str) -> Rule {
        if let Some(&rule) = self.names.get(name) {
            return rule;
        }
        let rule = Rule(self.rules.len() as u32);
        self.rules.push(RuleDef {
            name: name.to_string(),
            expr: None,
            action: None,
            node: None,
        });
        self.names.insert(name.to_string(), rule);
        rule
    }

    /// Attach the expression of a declared rule.
    ///
    /// # Panics
    /// If the rule already has an expression or belongs to another grammar.
    pub fn define(&mut self, rule: Rule, expr: impl Into<Expr>) -> Rule {
        let def = self.ensure_undefined(rule);
        def.expr = Some(expr.into());
        rule
    }

    /// Declare and define a rule in one step.
    pub fn add(&mut self, name: &str, expr: impl Into<Expr>) -> Rule {
        let rule = self.rule(name);
        self.define(rule, expr)
    }

    /// Build a `T` node from every successful match of `rule`.
    ///
    /// # Panics
    /// If the rule is already bound.
    pub fn bind<T: NodeType>(&mut self, rule: Rule) -> Rule {
        let def = self.ensure_unbound(rule, T::NAME);
        def.action = Some(build_node::<T>);
        def.node = Some(T::NAME);
        rule
    }

    /// Trivia skipped after every `term(..)` match.
    pub fn set_skip(&mut self, expr: impl Into<Expr>) {
        self.skip = Some(expr.into());
    }

    pub fn skip(&self) -> Option<&Expr> {
        self.skip.as_ref()
    }

    pub fn get(&self, name: &str) -> Option<Rule> {
        self.names.get(name).copied()
    }

    pub fn name(&self, rule: Rule) -> &str {
        &self.ensure_rule(rule).name
    }

    pub fn expr(&self, rule: Rule) -> Option<&Expr> {
        self.ensure_rule(rule).expr.as_ref()
    }

    /// Name of the node type bound to `rule`.
    pub fn node_name(&self, rule: Rule) -> Option<&'static str> {
        self.ensure_rule(rule).node
    }

    pub fn is_bound(&self, rule: Rule) -> bool {
        self.ensure_rule(rule).action.is_some()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        self.names.values().copied()
    }

    /// Names of rules that were declared but never defined.
    pub fn undefined(&self) -> impl Iterator<Item = &str> + '_ {
        self.rules
            .iter()
            .filter(|def| def.expr.is_none())
            .map(|def| def.name.as_str())
    }

    pub(crate) fn action(&self, rule: Rule) -> Option<Action> {
        self.ensure_rule(rule).action
    }

    pub(crate) fn def(&self, rule: Rule) -> Option<&RuleDef> {
        self.rules.get(rule.index())
    }

    pub(crate) fn def_mut(&mut self, rule: Rule) -> Option<&mut RuleDef> {
        self.rules.get_mut(rule.index())
    }

    /// Display an expression with rule names resolved against this grammar.
    pub fn display<'g>(&'g self, expr: &'g Expr) -> impl fmt::Display + 'g {
        ExprDisplay {
            grammar: self,
            expr,
        }
    }
}

struct ExprDisplay<'g> {
    grammar: &'g Grammar,
    expr: &'g Expr,
}

impl fmt::Display for ExprDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |rule: Rule| {
            self.grammar
                .def(rule)
                .map_or_else(|| format!("<{}>", rule.index()), |d| d.name.clone())
        };
        self.expr.write(f, &names)
    }
}

/// One line per rule: `name <- expr`, with `=> node` for bound rules.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rules.iter().map(|d| d.name.len()).max().unwrap_or(0);
        for (i, def) in self.rules.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:width$} <- ", def.name)?;
            match &def.expr {
                Some(expr) => write!(f, "{}", self.display(expr))?,
                None => f.write_str("?")?,
            }
            if let Some(node) = def.node {
                write!(f, " => {node}")?;
            }
        }
        Ok(())
    }
}
