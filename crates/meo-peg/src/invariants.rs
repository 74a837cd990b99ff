//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::ast::{Action, AstNode, NodeType, Selection};
use crate::engine::checkpoint::Checkpoint;
use crate::engine::seed::SeedKey;
use crate::engine::{Context, RuntimeError};
use crate::grammar::RuleDef;
use crate::{Expr, Grammar, Rule};

impl Grammar {
    pub(crate) fn ensure_rule(&self, rule: Rule) -> &RuleDef {
        self.def(rule).unwrap_or_else(|| foreign_rule(rule))
    }

    pub(crate) fn ensure_rule_mut(&mut self, rule: Rule) -> &mut RuleDef {
        self.def_mut(rule).unwrap_or_else(|| foreign_rule(rule))
    }

    pub(crate) fn ensure_undefined(&mut self, rule: Rule) -> &mut RuleDef {
        let def = self.ensure_rule_mut(rule);
        assert!(def.expr.is_none(), "rule `{}` is defined twice", def.name);
        def
    }

    pub(crate) fn ensure_unbound(&mut self, rule: Rule, node: &str) -> &mut RuleDef {
        let def = self.ensure_rule_mut(rule);
        if let Some(bound) = def.node {
            panic!(
                "rule `{}` is already bound to `{}`, cannot bind `{}`",
                def.name, bound, node
            );
        }
        def
    }

    pub(crate) fn ensure_defined(&self, rule: Rule) -> &Expr {
        let def = self.ensure_rule(rule);
        def.expr.as_ref().unwrap_or_else(|| {
            panic!(
                "Grammar: rule `{}` has no expression (Parser::new rejects incomplete grammars)",
                def.name
            )
        })
    }

    pub(crate) fn ensure_complete(&self) {
        let undefined: Vec<&str> = self.undefined().collect();
        assert!(
            undefined.is_empty(),
            "Grammar: rules declared but never defined: {}",
            undefined.join(", ")
        );
    }

    pub(crate) fn ensure_action(&self, rule: Rule) -> Action {
        self.action(rule).unwrap_or_else(|| {
            panic!(
                "Grammar: match logged for unbound rule `{}` (only bound rules are logged)",
                self.name(rule)
            )
        })
    }
}

fn foreign_rule(rule: Rule) -> ! {
    panic!(
        "Grammar: rule #{} not found (rule handles are only valid for the grammar that declared them)",
        rule.index()
    )
}

impl<'n> dyn AstNode + 'n {
    pub(crate) fn ensure_cast<T: NodeType>(&self) -> &T {
        let found = self.name();
        self.cast::<T>()
            .unwrap_or_else(|| panic!("expected `{}` node, found `{}`", T::NAME, found))
    }
}

#[inline]
pub(crate) fn ensure_populated<'a, T: ?Sized>(node: Option<&'a T>, expected: &str) -> &'a T {
    node.unwrap_or_else(|| {
        panic!("empty slot: expected `{expected}` (slot is optional or was taken)")
    })
}

#[inline]
pub(crate) fn ensure_accepted<S: Selection>(node: &dyn AstNode) {
    assert!(
        S::accepts(node),
        "slot accepts {}, cannot hold `{}`",
        S::expected(),
        node.name()
    );
}

impl Context<'_> {
    /// Innermost active invocation of `key`.
    pub(crate) fn ensure_frame(&self, key: SeedKey) -> (usize, Checkpoint) {
        let index = self
            .frames
            .iter()
            .rposition(|frame| frame.key == key)
            .unwrap_or_else(|| {
                panic!(
                    "seed growing: `{}` has seed state without an active invocation",
                    self.grammar.name(key.0)
                )
            });
        (index, self.frames[index].start)
    }

    /// Growth always unwinds to the invocation that owns the key, which is
    /// inside every top-level evaluation.
    pub(crate) fn ensure_no_growth(key: SeedKey) -> Result<bool, RuntimeError> {
        panic!(
            "seed growing: growth of rule #{} escaped its invocation",
            key.0.index()
        )
    }
}
