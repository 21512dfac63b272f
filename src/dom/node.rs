//! Tree node representation
//!
//! Nodes live in the document arena and refer to each other by [`NodeId`].
//! The parent link is an index, so it never owns anything.

use crate::core::kind::Kind;
use crate::core::span::Span;

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Id of the document node, always the first arena slot
pub const DOCUMENT_ID: NodeId = 0;

/// Per-kind node payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// Document root
    Document {
        /// Top-level nodes in document order
        children: Vec<NodeId>,
    },
    /// Markup element: open, solitary, declaration or instruction
    Element {
        /// Kind of the opening tag
        kind: Kind,
        /// Tag name
        name: String,
        /// Attribute nodes in source order
        attributes: Vec<NodeId>,
        /// Child nodes in source order
        children: Vec<NodeId>,
    },
    /// Attribute of an element
    Attribute {
        /// Name, empty for a lone quoted value
        name: String,
        /// Value with quotes stripped
        value: String,
    },
    /// Text or CDATA content
    Text {
        /// [`Kind::Text`] or [`Kind::Data`]
        kind: Kind,
    },
}

/// A node in the arena
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    /// Raw bytes of this node in the input
    pub span: Span,
    /// Kind-specific payload
    pub data: NodeData,
}

impl XmlNode {
    /// Create a new document root node
    pub fn document(span: Span) -> Self {
        XmlNode {
            parent: None,
            span,
            data: NodeData::Document { children: Vec::new() },
        }
    }

    /// Create a new element node
    pub fn element(kind: Kind, name: String, parent: NodeId, span: Span) -> Self {
        XmlNode {
            parent: Some(parent),
            span,
            data: NodeData::Element {
                kind,
                name,
                attributes: Vec::new(),
                children: Vec::new(),
            },
        }
    }

    /// Create a new attribute node
    pub fn attribute(name: String, value: String, parent: NodeId, span: Span) -> Self {
        XmlNode {
            parent: Some(parent),
            span,
            data: NodeData::Attribute { name, value },
        }
    }

    /// Create a new text or CDATA node
    pub fn text(kind: Kind, parent: NodeId, span: Span) -> Self {
        XmlNode {
            parent: Some(parent),
            span,
            data: NodeData::Text { kind },
        }
    }

    /// Structural kind of this node
    #[inline]
    pub fn kind(&self) -> Kind {
        match &self.data {
            NodeData::Document { .. } => Kind::Document,
            NodeData::Element { kind, .. } | NodeData::Text { kind } => *kind,
            NodeData::Attribute { .. } => Kind::Attribute,
        }
    }

    /// Child ids, empty for leaves
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        match &self.data {
            NodeData::Document { children } | NodeData::Element { children, .. } => children,
            _ => &[],
        }
    }

    /// Attribute ids, empty unless this is an element
    #[inline]
    pub fn attributes(&self) -> &[NodeId] {
        match &self.data {
            NodeData::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Element or attribute name
    #[inline]
    pub fn name(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { name, .. } | NodeData::Attribute { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Check if this is an element node
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }

    /// Check if this is a text or CDATA node
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        if let NodeData::Document { children } | NodeData::Element { children, .. } = &mut self.data {
            children.push(child);
        }
    }

    pub(crate) fn push_attribute(&mut self, attribute: NodeId) {
        if let NodeData::Element { attributes, .. } = &mut self.data {
            attributes.push(attribute);
        }
    }
}
