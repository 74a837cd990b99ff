//! Member slots: the fields through which a node owns its children.
//!
//! | Slot                | Holds                                  |
//! |---------------------|----------------------------------------|
//! | `AstPtr<R, T>`      | zero or one `T`                        |
//! | `AstSel<R, S>`      | zero or one node of any type in `S`    |
//! | `AstList<R, T>`     | a sequence of `T`                      |
//! | `AstSelList<R, S>`  | a sequence of nodes of types in `S`    |
//!
//! `R = true` makes the slot required: construction fails when the slot
//! would stay empty.

use std::fmt;
use std::marker::PhantomData;

use super::{AstNode, AstStack, ConstructError, Node, NodeType};
use crate::invariants::{ensure_accepted, ensure_populated};

/// A field that takes its content from the construction stack.
pub trait AstMember {
    fn construct(&mut self, stack: &mut AstStack) -> Result<(), ConstructError>;

    /// Call `visitor` on every held node in order until it returns `true`.
    fn visit<'s>(&'s self, visitor: &mut dyn FnMut(&'s (dyn AstNode + 'static)) -> bool) -> bool;
}

/// A closed set of node types accepted by selection slots.
///
/// Implemented for tuples of node types, `(Num,)` up to eight elements,
/// and for [`AnyNode`].
pub trait Selection: 'static {
    fn accepts(node: &dyn AstNode) -> bool;

    /// Human-readable list of accepted types for error messages.
    fn expected() -> String;
}

/// Selection accepting every node type.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyNode;

impl Selection for AnyNode {
    fn accepts(_: &dyn AstNode) -> bool {
        true
    }

    fn expected() -> String {
        "any node".to_string()
    }
}

macro_rules! impl_selection {
    ($($t:ident),+) => {
        impl<$($t: NodeType),+> Selection for ($($t,)+) {
            fn accepts(node: &dyn AstNode) -> bool {
                $(node.is::<$t>())||+
            }

            fn expected() -> String {
                [$(format!("`{}`", <$t as NodeType>::NAME)),+].join(" or ")
            }
        }
    };
}

impl_selection!(A);
impl_selection!(A, B);
impl_selection!(A, B, C);
impl_selection!(A, B, C, D);
impl_selection!(A, B, C, D, E);
impl_selection!(A, B, C, D, E, F);
impl_selection!(A, B, C, D, E, F, G);
impl_selection!(A, B, C, D, E, F, G, H);

fn expected_type<T: NodeType>() -> String {
    format!("`{}`", T::NAME)
}

// ============================================================================
// AstPtr
// ============================================================================

/// Zero or one child of type `T`.
#[derive(Debug)]
pub struct AstPtr<const REQUIRED: bool, T> {
    node: Option<Box<T>>,
}

impl<const REQUIRED: bool, T> Default for AstPtr<REQUIRED, T> {
    fn default() -> Self {
        Self { node: None }
    }
}

impl<const REQUIRED: bool, T: NodeType> AstPtr<REQUIRED, T> {
    pub fn get(&self) -> Option<&T> {
        self.node.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.node.as_deref_mut()
    }

    /// The held node.
    ///
    /// # Panics
    /// If the slot is empty. Required slots of a constructed node never are.
    pub fn node(&self) -> &T {
        ensure_populated(self.node.as_deref(), T::NAME)
    }

    /// Replace the content, returning the previous node.
    pub fn set(&mut self, node: T) -> Option<Box<T>> {
        self.node.replace(Box::new(node))
    }

    pub fn take(&mut self) -> Option<Box<T>> {
        self.node.take()
    }

    pub fn is_some(&self) -> bool {
        self.node.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.node.is_none()
    }
}

impl<const REQUIRED: bool, T: NodeType> AstMember for AstPtr<REQUIRED, T> {
    fn construct(&mut self, stack: &mut AstStack) -> Result<(), ConstructError> {
        match stack.pop_as::<T>() {
            Some(node) => {
                self.node = Some(node);
                Ok(())
            }
            None if REQUIRED => Err(stack.unexpected(expected_type::<T>())),
            None => Ok(()),
        }
    }

    fn visit<'s>(&'s self, visitor: &mut dyn FnMut(&'s (dyn AstNode + 'static)) -> bool) -> bool {
        match &self.node {
            Some(node) => visitor(&**node),
            None => false,
        }
    }
}

// ============================================================================
// AstSel
// ============================================================================

/// Zero or one child whose type is one of `S`.
pub struct AstSel<const REQUIRED: bool, S> {
    node: Option<Node>,
    _selection: PhantomData<fn() -> S>,
}

impl<const REQUIRED: bool, S> Default for AstSel<REQUIRED, S> {
    fn default() -> Self {
        Self {
            node: None,
            _selection: PhantomData,
        }
    }
}

impl<const REQUIRED: bool, S> fmt::Debug for AstSel<REQUIRED, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AstSel").field(&self.node).finish()
    }
}

impl<const REQUIRED: bool, S: Selection> AstSel<REQUIRED, S> {
    pub fn get(&self) -> Option<&(dyn AstNode + 'static)> {
        self.node.as_deref()
    }

    pub fn get_mut(&mut self) -> Option<&mut (dyn AstNode + 'static)> {
        self.node.as_deref_mut()
    }

    /// # Panics
    /// If the slot is empty.
    pub fn node(&self) -> &(dyn AstNode + 'static) {
        ensure_populated(self.node.as_deref(), "selection")
    }

    /// The held node as a `T`, if it is one.
    pub fn cast<T: AstNode>(&self) -> Option<&T> {
        self.get()?.cast::<T>()
    }

    pub fn is<T: AstNode>(&self) -> bool {
        self.get().is_some_and(|node| node.is::<T>())
    }

    /// Replace the content, returning the previous node.
    ///
    /// # Panics
    /// If `S` does not accept the node.
    pub fn set(&mut self, node: Node) -> Option<Node> {
        ensure_accepted::<S>(&*node);
        self.node.replace(node)
    }

    pub fn take(&mut self) -> Option<Node> {
        self.node.take()
    }

    pub fn is_some(&self) -> bool {
        self.node.is_some()
    }

    pub fn is_none(&self) -> bool {
        self.node.is_none()
    }
}

impl<const REQUIRED: bool, S: Selection> AstMember for AstSel<REQUIRED, S> {
    fn construct(&mut self, stack: &mut AstStack) -> Result<(), ConstructError> {
        let accepted = stack.peek().is_some_and(|top| S::accepts(top));
        if accepted {
            self.node = stack.pop();
            return Ok(());
        }
        if REQUIRED {
            return Err(stack.unexpected(S::expected()));
        }
        Ok(())
    }

    fn visit<'s>(&'s self, visitor: &mut dyn FnMut(&'s (dyn AstNode + 'static)) -> bool) -> bool {
        match &self.node {
            Some(node) => visitor(&**node),
            None => false,
        }
    }
}

// ============================================================================
// AstList
// ============================================================================

/// A sequence of children of type `T`, in match order.
///
/// Construction takes every `T` from the top of the stack. Slots are filled
/// last to first, so a slot accepting `T` declared before the list is left
/// empty.
#[derive(Debug)]
pub struct AstList<const REQUIRED: bool, T> {
    nodes: Vec<Box<T>>,
}

impl<const REQUIRED: bool, T> Default for AstList<REQUIRED, T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

impl<const REQUIRED: bool, T: NodeType> AstList<REQUIRED, T> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.nodes.get(index).map(|node| &**node)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.nodes.get_mut(index).map(|node| &mut **node)
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn last(&self) -> Option<&T> {
        self.nodes.last().map(|node| &**node)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.nodes.iter().map(|node| &**node)
    }

    pub fn push_back(&mut self, node: T) {
        self.nodes.push(Box::new(node));
    }

    pub fn push_front(&mut self, node: T) {
        self.nodes.insert(0, Box::new(node));
    }

    pub fn pop_back(&mut self) -> Option<Box<T>> {
        self.nodes.pop()
    }

    pub fn pop_front(&mut self) -> Option<Box<T>> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(self.nodes.remove(0))
    }

    /// Replace the node at `index`, returning the old one.
    ///
    /// # Panics
    /// If `index` is out of bounds.
    pub fn swap(&mut self, index: usize, node: T) -> Box<T> {
        std::mem::replace(&mut self.nodes[index], Box::new(node))
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<const REQUIRED: bool, T: NodeType> AstMember for AstList<REQUIRED, T> {
    fn construct(&mut self, stack: &mut AstStack) -> Result<(), ConstructError> {
        let mut taken = Vec::new();
        while let Some(node) = stack.pop_as::<T>() {
            taken.push(node);
        }
        if REQUIRED && taken.is_empty() && self.nodes.is_empty() {
            return Err(stack.unexpected(expected_type::<T>()));
        }
        taken.reverse();
        taken.append(&mut self.nodes);
        self.nodes = taken;
        Ok(())
    }

    fn visit<'s>(&'s self, visitor: &mut dyn FnMut(&'s (dyn AstNode + 'static)) -> bool) -> bool {
        self.nodes.iter().any(|node| visitor(&**node))
    }
}

impl<'a, const REQUIRED: bool, T: NodeType> IntoIterator for &'a AstList<REQUIRED, T> {
    type Item = &'a T;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, Box<T>>, fn(&'a Box<T>) -> &'a T>;

    fn into_iter(self) -> Self::IntoIter {
        let unbox: fn(&'a Box<T>) -> &'a T = |node| node;
        self.nodes.iter().map(unbox)
    }
}

// ============================================================================
// AstSelList
// ============================================================================

/// A sequence of children whose types are each one of `S`, in match order.
pub struct AstSelList<const REQUIRED: bool, S> {
    nodes: Vec<Node>,
    _selection: PhantomData<fn() -> S>,
}

impl<const REQUIRED: bool, S> Default for AstSelList<REQUIRED, S> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            _selection: PhantomData,
        }
    }
}

impl<const REQUIRED: bool, S> fmt::Debug for AstSelList<REQUIRED, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.nodes).finish()
    }
}

impl<const REQUIRED: bool, S: Selection> AstSelList<REQUIRED, S> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&(dyn AstNode + 'static)> {
        self.nodes.get(index).map(|node| &**node)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &(dyn AstNode + 'static)> + '_ {
        self.nodes.iter().map(|node| &**node)
    }

    /// Elements that are a `T`, skipping the others.
    pub fn iter_as<T: AstNode>(&self) -> impl Iterator<Item = &T> + '_ {
        self.nodes.iter().filter_map(|node| node.cast::<T>())
    }

    /// # Panics
    /// If `S` does not accept the node.
    pub fn push_back(&mut self, node: Node) {
        ensure_accepted::<S>(&*node);
        self.nodes.push(node);
    }

    /// # Panics
    /// If `S` does not accept the node.
    pub fn push_front(&mut self, node: Node) {
        ensure_accepted::<S>(&*node);
        self.nodes.insert(0, node);
    }

    pub fn pop_back(&mut self) -> Option<Node> {
        self.nodes.pop()
    }

    pub fn pop_front(&mut self) -> Option<Node> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(self.nodes.remove(0))
    }

    /// Replace the node at `index`, returning the old one.
    ///
    /// # Panics
    /// If `index` is out of bounds or `S` does not accept the node.
    pub fn swap(&mut self, index: usize, node: Node) -> Node {
        ensure_accepted::<S>(&*node);
        std::mem::replace(&mut self.nodes[index], node)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<const REQUIRED: bool, S: Selection> AstMember for AstSelList<REQUIRED, S> {
    fn construct(&mut self, stack: &mut AstStack) -> Result<(), ConstructError> {
        let mut taken = Vec::new();
        while stack.peek().is_some_and(|top| S::accepts(top)) {
            let Some(node) = stack.pop() else { break };
            taken.push(node);
        }
        if REQUIRED && taken.is_empty() && self.nodes.is_empty() {
            return Err(stack.unexpected(S::expected()));
        }
        taken.reverse();
        taken.append(&mut self.nodes);
        self.nodes = taken;
        Ok(())
    }

    fn visit<'s>(&'s self, visitor: &mut dyn FnMut(&'s (dyn AstNode + 'static)) -> bool) -> bool {
        self.nodes.iter().any(|node| visitor(&**node))
    }
}
