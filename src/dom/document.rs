//! XML Document - Arena-based tree
//!
//! The document borrows the input buffer and owns every node through a
//! single arena. Names and attribute values are copied out of the input;
//! everything else is a span into it.

use super::builder::TreeBuilder;
use super::node::{NodeData, NodeId, XmlNode, DOCUMENT_ID};
use crate::core::kind::Kind;
use crate::core::span::preview;
use crate::error::ParseError;

/// A parsed document
#[derive(Debug, Clone)]
pub struct Document<'a> {
    /// Diagnostic source identifier (URL, path)
    source: String,
    /// Original input
    input: &'a [u8],
    /// Arena of nodes, document node first
    nodes: Vec<XmlNode>,
}

impl<'a> Document<'a> {
    /// Parse a document from a byte slice
    pub fn parse(source: &str, input: &'a [u8]) -> Result<Self, ParseError> {
        TreeBuilder::new(source, input).build()
    }

    pub(crate) fn from_parts(source: &str, input: &'a [u8], nodes: Vec<XmlNode>) -> Self {
        Document {
            source: source.to_owned(),
            input,
            nodes,
        }
    }

    /// Diagnostic source identifier
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The whole input buffer
    pub fn input(&self) -> &'a [u8] {
        self.input
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get a node by ID
    #[inline]
    pub fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    /// Structural kind of a node, [`Kind::Undefined`] for an unknown id
    pub fn kind(&self, id: NodeId) -> Kind {
        self.get_node(id).map_or(Kind::Undefined, XmlNode::kind)
    }

    /// Raw bytes of a node
    pub fn content(&self, id: NodeId) -> &'a [u8] {
        self.get_node(id).map_or(&[], |n| n.span.slice(self.input))
    }

    /// Element or attribute name
    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get_node(id)?.name()
    }

    /// Text of a text node; CDATA has its `<![CDATA[` / `]]>` wrapper removed
    pub fn text(&self, id: NodeId) -> Option<&'a [u8]> {
        let node = self.get_node(id)?;
        let NodeData::Text { kind } = node.data else {
            return None;
        };
        let raw = node.span.slice(self.input);
        if kind == Kind::Data {
            let inner = raw.strip_prefix(b"<![CDATA[").unwrap_or(raw);
            return Some(inner.strip_suffix(b"]]>").unwrap_or(inner));
        }
        Some(raw)
    }

    /// Nesting depth: 0 for the document, parent depth + 1 for everything else
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get_node(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            depth += 1;
            current = self.get_node(parent).and_then(|n| n.parent);
        }
        depth
    }

    /// Number of children of a container node
    pub fn child_count(&self, id: NodeId) -> usize {
        self.get_node(id).map_or(0, |n| n.children().len())
    }

    /// Child of a container node by position
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.get_node(id)?.children().get(index).copied()
    }

    /// Number of attributes of an element
    pub fn attribute_count(&self, id: NodeId) -> usize {
        self.get_node(id).map_or(0, |n| n.attributes().len())
    }

    /// Attribute node of an element by position
    pub fn attribute(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.get_node(id)?.attributes().get(index).copied()
    }

    /// Attribute value by name
    pub fn attribute_value(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attribute_pairs(id)
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// All attribute names and values of an element, in source order
    pub fn attribute_pairs(&self, id: NodeId) -> Vec<(&str, &str)> {
        let Some(node) = self.get_node(id) else {
            return Vec::new();
        };
        node.attributes()
            .iter()
            .filter_map(|&attr| match &self.get_node(attr)?.data {
                NodeData::Attribute { name, value } => Some((name.as_str(), value.as_str())),
                _ => None,
            })
            .collect()
    }

    /// First top-level `Open` or `Solitary` element
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(DOCUMENT_ID)
            .find(|&id| matches!(self.kind(id), Kind::Open | Kind::Solitary))
    }

    /// Short diagnostic rendering of a node
    ///
    /// Elements render as the name followed by attribute names, attributes as
    /// their name (or value when unnamed), everything else as the first line
    /// of its content clamped to twenty bytes.
    pub fn describe(&self, id: NodeId) -> String {
        let Some(node) = self.get_node(id) else {
            return String::new();
        };
        match &node.data {
            NodeData::Element { name, attributes, .. } => {
                let mut out = name.clone();
                for &attr in attributes {
                    out.push(' ');
                    out.push_str(self.name(attr).unwrap_or(""));
                }
                out
            }
            NodeData::Attribute { name, value } if name.is_empty() => value.clone(),
            NodeData::Attribute { name, .. } => name.clone(),
            NodeData::Document { .. } | NodeData::Text { .. } => preview(self.content(id)),
        }
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.get_node(id)
            .map_or(&[][..], XmlNode::children)
            .iter()
            .copied()
    }

    /// Iterate over all descendants of a node in document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_, 'a> {
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        DescendantIter { doc: self, stack }
    }
}

/// Depth-first iterator over descendant nodes
pub struct DescendantIter<'d, 'a> {
    doc: &'d Document<'a>,
    stack: Vec<NodeId>,
}

impl<'d, 'a> Iterator for DescendantIter<'d, 'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Some(node) = self.doc.get_node(current) {
            self.stack.extend(node.children().iter().rev());
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = Document::parse("mem", b"<root>hello</root>").unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!(doc.name(root), Some("root"));
        assert_eq!(doc.child_count(root), 1);
        assert_eq!(doc.text(doc.child(root, 0).unwrap()), Some(&b"hello"[..]));
        assert_eq!(doc.source(), "mem");
    }

    #[test]
    fn test_descendants() {
        let doc = Document::parse("mem", b"<root><a/><b><c/></b></root>").unwrap();
        let root = doc.root_element().unwrap();
        let names: Vec<_> = doc.descendants(root).filter_map(|id| doc.name(id)).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_depth_follows_parents() {
        let doc = Document::parse("mem", b"<a><b><c/></b></a>").unwrap();
        assert_eq!(doc.depth(DOCUMENT_ID), 0);
        let a = doc.root_element().unwrap();
        let b = doc.child(a, 0).unwrap();
        let c = doc.child(b, 0).unwrap();
        assert_eq!(doc.depth(a), 1);
        assert_eq!(doc.depth(b), doc.depth(a) + 1);
        assert_eq!(doc.depth(c), doc.depth(b) + 1);
    }

    #[test]
    fn test_attribute_access() {
        let doc = Document::parse("mem", b"<div id=\"main\" class='x' hidden/>").unwrap();
        let div = doc.root_element().unwrap();
        assert_eq!(doc.attribute_count(div), 3);
        assert_eq!(doc.attribute_value(div, "id"), Some("main"));
        assert_eq!(doc.attribute_value(div, "class"), Some("x"));
        assert_eq!(doc.attribute_value(div, "hidden"), Some(""));
        assert_eq!(doc.attribute_value(div, "missing"), None);

        let id_attr = doc.attribute(div, 0).unwrap();
        assert_eq!(doc.kind(id_attr), Kind::Attribute);
        assert_eq!(doc.content(id_attr), b"id=\"main\"");
        assert_eq!(doc.depth(id_attr), 2);
    }

    #[test]
    fn test_cdata_text() {
        let doc = Document::parse("mem", b"<s><![CDATA[a < b]]></s>").unwrap();
        let s = doc.root_element().unwrap();
        let data = doc.child(s, 0).unwrap();
        assert_eq!(doc.kind(data), Kind::Data);
        assert_eq!(doc.text(data), Some(&b"a < b"[..]));
        assert_eq!(doc.content(data), b"<![CDATA[a < b]]>");
    }

    #[test]
    fn test_describe() {
        let doc = Document::parse("mem", b"<a x=\"1\" y=\"2\">first line of a long text\nnext</a>")
            .unwrap();
        let a = doc.root_element().unwrap();
        assert_eq!(doc.describe(a), "a x y");
        assert_eq!(doc.describe(doc.attribute(a, 1).unwrap()), "y");
        assert_eq!(doc.describe(doc.child(a, 0).unwrap()), "first line of a long");
    }

    #[test]
    fn test_unknown_ids() {
        let doc = Document::parse("mem", b"<a/>").unwrap();
        assert_eq!(doc.kind(99), Kind::Undefined);
        assert_eq!(doc.content(99), b"");
        assert_eq!(doc.child(99, 0), None);
        assert_eq!(doc.describe(99), "");
    }
}
