//! Typed AST framework.
//!
//! Node types are plain structs whose fields are member slots:
//!
//! ```
//! use meo_peg::ast::{AstList, AstPtr};
//! use meo_peg::{AstNode, Span};
//!
//! #[derive(Debug, Default, AstNode)]
//! struct Name {
//!     span: Span,
//! }
//!
//! #[derive(Debug, Default, AstNode)]
//! struct Num {
//!     span: Span,
//! }
//!
//! #[derive(Debug, Default, AstNode)]
//! struct Call {
//!     span: Span,
//!     callee: AstPtr<true, Name>,
//!     args: AstList<false, Num>,
//! }
//! ```
//!
//! Slots are filled last to first, so a list takes every matching node and
//! leaves none for earlier slots of the same type.
//!
//! While parsing, successful matches of bound rules are logged. After the
//! whole input is accepted the log is replayed bottom-up: each node pops its
//! children off an [`AstStack`] through its slots, then is pushed itself.

use std::any::{Any, TypeId};
use std::fmt;

use crate::Span;

mod builder;
mod error;
mod member;
mod printer;
mod stack;
mod view;

#[cfg(test)]
mod member_tests;

pub(crate) use builder::{Action, AstBuilder, build_node};
pub use error::ConstructError;
pub use member::{AnyNode, AstList, AstMember, AstPtr, AstSel, AstSelList, Selection};
pub use printer::Printer;
pub use stack::AstStack;
pub use view::NodeView;

/// An owned node of any type.
pub type Node = Box<dyn AstNode>;

/// Object-safe interface of every AST node. Usually derived.
pub trait AstNode: Any + fmt::Debug {
    /// Node name used in dumps and construction errors.
    fn name(&self) -> &'static str;

    fn span(&self) -> Span;

    fn set_span(&mut self, span: Span);

    /// Whether the type declares no member slots.
    fn is_leaf(&self) -> bool;

    /// Fill member slots from the construction stack, last slot first.
    fn construct(&mut self, stack: &mut AstStack) -> Result<(), ConstructError>;

    /// Call `visitor` on each direct child in declaration order until it
    /// returns `true`. Returns whether the visit was stopped.
    fn visit_children<'s>(
        &'s self,
        visitor: &mut dyn FnMut(&'s (dyn AstNode + 'static)) -> bool,
    ) -> bool;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Static side of a node type.
pub trait NodeType: AstNode + Default {
    const NAME: &'static str;
}

/// Visitor verdict for [`traverse`](dyn AstNode::traverse).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Traversal {
    /// Descend into the children.
    Continue,
    /// Skip the children, keep going with the siblings.
    Return,
    /// Abort the whole traversal.
    Stop,
}

impl<'n> dyn AstNode + 'n {
    pub fn is<T: AstNode>(&self) -> bool {
        self.as_any().is::<T>()
    }

    pub fn cast<T: AstNode>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn cast_mut<T: AstNode>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    /// Like [`cast`](Self::cast), for call sites where the type is known.
    ///
    /// # Panics
    /// If the node is not a `T`.
    pub fn to<T: NodeType>(&self) -> &T {
        self.ensure_cast::<T>()
    }

    pub fn downcast<T: AstNode>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }

    /// `TypeId` of the concrete node type.
    pub fn node_type_id(&self) -> TypeId {
        Any::type_id(self.as_any())
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        self.span().text(source)
    }

    /// Depth-first pre-order walk.
    pub fn traverse(&self, visitor: &mut dyn FnMut(&dyn AstNode) -> Traversal) -> Traversal {
        match visitor(self) {
            Traversal::Stop => return Traversal::Stop,
            Traversal::Return => return Traversal::Continue,
            Traversal::Continue => {}
        }
        let mut outcome = Traversal::Continue;
        self.visit_children(&mut |child| {
            if child.traverse(visitor) == Traversal::Stop {
                outcome = Traversal::Stop;
                return true;
            }
            false
        });
        outcome
    }

    pub fn children(&self) -> Vec<&(dyn AstNode + 'static)> {
        let mut children = Vec::new();
        self.visit_children(&mut |child| {
            children.push(child);
            false
        });
        children
    }

    /// First direct child of type `T`.
    pub fn find_child<T: AstNode>(&self) -> Option<&T> {
        let mut found = None;
        self.visit_children(&mut |child| {
            found = child.cast::<T>();
            found.is_some()
        });
        found
    }

    /// Follow a chain of child types, taking the first matching child at
    /// every level.
    pub fn get_by_path(&self, path: &[TypeId]) -> Option<&dyn AstNode> {
        let Some((&first, rest)) = path.split_first() else {
            return Some(self);
        };
        let child = self.child_of_type(first)?;
        child.get_by_path(rest)
    }

    fn child_of_type(&self, type_id: TypeId) -> Option<&(dyn AstNode + 'static)> {
        let mut found = None;
        self.visit_children(&mut |child| {
            if child.node_type_id() == type_id {
                found = Some(child);
                return true;
            }
            false
        });
        found
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        let mut count = 0;
        self.traverse(&mut |_| {
            count += 1;
            Traversal::Continue
        });
        count
    }
}
