//! Construction stack shared by all nodes of one build.

use super::{AstNode, ConstructError, Node};

/// Finished nodes waiting for a parent.
///
/// While a node is constructed, the stack is scoped to the children of that
/// node: everything below the floor belongs to earlier siblings and is
/// invisible to `peek`/`pop`.
#[derive(Debug, Default)]
pub struct AstStack {
    nodes: Vec<Node>,
    floor: usize,
    owner: &'static str,
}

impl AstStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of nodes, including those below the floor.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes above the floor.
    pub fn available(&self) -> usize {
        self.nodes.len().saturating_sub(self.floor)
    }

    pub fn peek(&self) -> Option<&(dyn AstNode + 'static)> {
        if self.available() == 0 {
            return None;
        }
        self.nodes.last().map(|node| &**node)
    }

    pub fn pop(&mut self) -> Option<Node> {
        if self.available() == 0 {
            return None;
        }
        self.nodes.pop()
    }

    /// Pop the top node if it is a `T`.
    pub fn pop_as<T: AstNode>(&mut self) -> Option<Box<T>> {
        if !self.peek()?.is::<T>() {
            return None;
        }
        self.pop()?.downcast::<T>()
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Scope the stack to the nodes from `floor` upwards.
    pub fn enter(&mut self, floor: usize) {
        self.floor = floor.min(self.nodes.len());
    }

    /// Name reported by construction errors.
    pub fn set_owner(&mut self, owner: &'static str) {
        self.owner = owner;
    }

    /// Drop the scope so the whole stack is visible again.
    pub fn leave(&mut self) {
        self.floor = 0;
        self.owner = "";
    }

    /// Name of the node being constructed.
    pub fn owner(&self) -> &'static str {
        self.owner
    }

    /// Error for a required slot of the owner that cannot take the top node.
    pub fn unexpected(&self, expected: String) -> ConstructError {
        match self.peek() {
            None => ConstructError::Missing {
                node: self.owner,
                expected,
            },
            Some(found) => ConstructError::Mismatch {
                node: self.owner,
                expected,
                found: found.name(),
            },
        }
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}
