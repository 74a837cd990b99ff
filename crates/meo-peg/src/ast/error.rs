//! Errors raised while replaying matches into nodes.

/// A node could not take the children the parse produced.
///
/// These indicate a mismatch between grammar and node declarations, never a
/// problem with the input itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructError {
    /// A required slot found nothing left on the stack.
    #[error("`{node}` expected {expected}, found nothing")]
    Missing {
        node: &'static str,
        expected: String,
    },

    /// A required slot found a node it does not accept.
    #[error("`{node}` expected {expected}, found `{found}`")]
    Mismatch {
        node: &'static str,
        expected: String,
        found: &'static str,
    },

    /// Children remained after all slots were filled.
    #[error("`{node}` left {count} child node(s) unconsumed")]
    Unconsumed { node: &'static str, count: usize },

    #[error("expected exactly one root node, found {count}")]
    RootCount { count: usize },

    #[error("expected root `{expected}`, found `{found}`")]
    RootType {
        expected: &'static str,
        found: &'static str,
    },
}
