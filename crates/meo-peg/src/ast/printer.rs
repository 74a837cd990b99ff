use std::fmt::Write;

use meo_core::Colors;
use meo_core::utils::truncate_text;

use super::AstNode;

const MAX_TEXT: usize = 40;

/// S-expression dump of a tree.
///
/// Leaves show their text, containers list their children one per line and
/// show nothing else when every slot is empty:
///
/// ```text
/// (binary
///   (num "1")
///   (op "+")
///   (num "2"))
/// ```
pub struct Printer<'a> {
    node: &'a dyn AstNode,
    source: &'a str,
    spans: bool,
    colors: Colors,
}

impl<'a> Printer<'a> {
    pub fn new(node: &'a dyn AstNode, source: &'a str) -> Self {
        Self {
            node,
            source,
            spans: false,
            colors: Colors::OFF,
        }
    }

    pub fn spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colors = Colors::new(value);
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(self.node, 0, w)
    }

    fn format_node(&self, node: &dyn AstNode, depth: usize, w: &mut impl Write) -> std::fmt::Result {
        let c = &self.colors;
        write!(w, "{}({}{}{}", "  ".repeat(depth), c.name, node.name(), c.reset)?;
        if self.spans {
            write!(w, " {}[{}]{}", c.meta, node.span(), c.reset)?;
        }

        if node.is_leaf() {
            let text = truncate_text(node.text(self.source), MAX_TEXT);
            write!(w, " {}\"{}\"{}", c.text, text, c.reset)?;
        }
        for child in node.children() {
            writeln!(w)?;
            self.format_node(child, depth + 1, w)?;
        }
        w.write_str(")")
    }
}
