//! Grammar for a subset of Meo: expressions, assignments and expression
//! statements, one per line.
//!
//! ```
//! use meo_expr::{Assign, Binary, language};
//!
//! let source = "x = 1 + 2 * 3";
//! let block = language().parse_block(source).unwrap();
//! let assign = block.stats.get(0).unwrap().cast::<Assign>().unwrap();
//! let sum = assign.value.cast::<Binary>().unwrap();
//! assert_eq!(sum.op.node().span.text(source), "+");
//! ```

use std::sync::LazyLock;

use meo_peg::{Grammar, Node, Parser, Result, Rule};

mod grammar;
mod nodes;

#[cfg(test)]
mod grammar_tests;

pub use nodes::{
    Args, Assign, Binary, Block, Call, Callee, Exp, ExpStat, Name, Num, Op, Parens, Stat, Str,
    Unary, Variable,
};

static LANGUAGE: LazyLock<ExprLanguage> = LazyLock::new(ExprLanguage::new);

/// The shared, lazily built grammar.
pub fn language() -> &'static ExprLanguage {
    &LANGUAGE
}

/// The Meo subset grammar with its start rules.
#[derive(Debug)]
pub struct ExprLanguage {
    grammar: Grammar,
    block: Rule,
    exp: Rule,
}

impl ExprLanguage {
    pub fn new() -> Self {
        let (grammar, entries) = grammar::build();
        Self {
            grammar,
            block: entries.block,
            exp: entries.exp,
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn parser(&self) -> Parser<'_> {
        Parser::new(&self.grammar)
    }

    /// Start rule for whole sources.
    pub fn block_rule(&self) -> Rule {
        self.block
    }

    /// Start rule for a single expression, surrounding blanks allowed.
    pub fn exp_rule(&self) -> Rule {
        self.exp
    }

    pub fn rule(&self, name: &str) -> Option<Rule> {
        self.grammar.get(name)
    }

    pub fn parse_block(&self, source: &str) -> Result<Box<Block>> {
        self.parser().parse_as::<Block>(source, self.block)
    }

    pub fn parse_exp(&self, source: &str) -> Result<Node> {
        self.parser().parse(source, self.exp)
    }
}

impl Default for ExprLanguage {
    fn default() -> Self {
        Self::new()
    }
}
