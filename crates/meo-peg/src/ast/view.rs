//! Serializable view of a tree.

use serde::Serialize;
use serde::ser::SerializeMap;

use super::AstNode;

/// Serializes a node as `{"name", "span", "text"}` for leaves and
/// `{"name", "span", "children"}` for containers.
pub struct NodeView<'a> {
    node: &'a dyn AstNode,
    source: &'a str,
}

impl<'a> NodeView<'a> {
    pub fn new(node: &'a dyn AstNode, source: &'a str) -> Self {
        Self { node, source }
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let children = self.node.children();
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", self.node.name())?;
        map.serialize_entry("span", &self.node.span())?;
        if children.is_empty() {
            map.serialize_entry("text", self.node.text(self.source))?;
        } else {
            let views: Vec<NodeView<'_>> = children
                .into_iter()
                .map(|child| NodeView::new(child, self.source))
                .collect();
            map.serialize_entry("children", &views)?;
        }
        map.end()
    }
}
