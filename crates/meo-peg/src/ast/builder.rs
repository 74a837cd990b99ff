//! Replays the match log of a successful parse into a tree.

use super::{AstStack, ConstructError, Node, NodeType};
use crate::engine::Match;
use crate::{Grammar, Span};

/// Node constructor attached to a bound rule.
///
/// Runs with the stack scoped to the children of the match and leaves
/// exactly one new node on it.
pub(crate) type Action = fn(&mut AstStack, Span) -> Result<(), ConstructError>;

pub(crate) fn build_node<T: NodeType>(
    stack: &mut AstStack,
    span: Span,
) -> Result<(), ConstructError> {
    stack.set_owner(T::NAME);
    let mut node = T::default();
    node.set_span(span);
    node.construct(stack)?;

    let count = stack.available();
    if count > 0 {
        return Err(ConstructError::Unconsumed {
            node: T::NAME,
            count,
        });
    }

    stack.push(Box::new(node));
    Ok(())
}

/// Bottom-up tree builder.
///
/// Matches are logged in completion order, so children always precede their
/// parent. Entry `i` with `d` descendants owns exactly the nodes produced by
/// entries `i - d .. i`, which sit on top of the stack when `i` is replayed.
pub(crate) struct AstBuilder<'g> {
    grammar: &'g Grammar,
    stack: AstStack,
    /// Stack height before each replayed entry.
    heights: Vec<usize>,
}

impl<'g> AstBuilder<'g> {
    pub(crate) fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            stack: AstStack::new(),
            heights: Vec::new(),
        }
    }

    pub(crate) fn build(mut self, matches: &[Match]) -> Result<Node, ConstructError> {
        self.heights.reserve(matches.len());
        for (index, entry) in matches.iter().enumerate() {
            self.heights.push(self.stack.len());
            let first = index.saturating_sub(entry.descendants);
            self.stack.enter(self.heights[first]);

            let action = self.grammar.ensure_action(entry.rule);
            action(&mut self.stack, entry.span)?;
            self.stack.leave();
        }

        let mut nodes = self.stack.into_nodes();
        let count = nodes.len();
        match nodes.pop() {
            Some(root) if count == 1 => Ok(root),
            _ => Err(ConstructError::RootCount { count }),
        }
    }
}
