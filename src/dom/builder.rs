//! Tree assembly from classified spans
//!
//! Tokens are consumed in document order with an explicit stack of open
//! elements. An `Open` tag pushes a frame and every close tag pops one, so
//! each frame holds exactly one not-yet-closed element. Close tags match by
//! count, not by name. Input is accepted only when the stack is empty at the
//! end and no close tag arrives with nothing open.

use super::document::Document;
use super::node::{NodeId, XmlNode, DOCUMENT_ID};
use crate::core::attributes::{attribute_extent, parse_attribute, Attribute};
use crate::core::kind::Kind;
use crate::core::scanner::{class_run, is_identifier_char, is_tag_boundary, is_whitespace};
use crate::core::span::Span;
use crate::core::tokenizer::{tokenize, Token};
use crate::error::ParseError;

/// An element whose close tag has not been seen yet
#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    start: usize,
}

/// Builds a [`Document`] arena from one input buffer
pub struct TreeBuilder<'s, 'a> {
    source: &'s str,
    input: &'a [u8],
    nodes: Vec<XmlNode>,
    stack: Vec<Frame>,
}

impl<'s, 'a> TreeBuilder<'s, 'a> {
    pub fn new(source: &'s str, input: &'a [u8]) -> Self {
        let mut nodes = Vec::with_capacity(input.len() / 16 + 1);
        nodes.push(XmlNode::document(Span::between(0, input.len())));
        TreeBuilder {
            source,
            input,
            nodes,
            stack: Vec::new(),
        }
    }

    /// Tokenize the whole input and assemble the tree
    pub fn build(mut self) -> Result<Document<'a>, ParseError> {
        let result = tokenize(self.source, self.input).and_then(|tokens| {
            for token in tokens {
                self.push_token(token)?;
            }
            self.finish()
        });

        match &result {
            Ok(()) => log::debug!("{}: built {} nodes", self.source, self.nodes.len()),
            Err(err) => log::debug!("{}: parse failed: {}", self.source, err.reason()),
        }
        result.map(|()| Document::from_parts(self.source, self.input, self.nodes))
    }

    /// Node that receives the next child
    #[inline]
    fn current(&self) -> NodeId {
        self.stack.last().map_or(DOCUMENT_ID, |f| f.node)
    }

    fn push_node(&mut self, node: XmlNode) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        id
    }

    fn append_child(&mut self, parent: NodeId, node: XmlNode) -> NodeId {
        let id = self.push_node(node);
        self.nodes[parent as usize].push_child(id);
        id
    }

    /// Consume one token
    pub fn push_token(&mut self, token: Token) -> Result<(), ParseError> {
        match token.kind {
            Kind::Open => {
                let node = self.element(token)?;
                self.stack.push(Frame {
                    node,
                    start: token.span.start(),
                });
            }
            Kind::Solitary | Kind::Declaration | Kind::Instruction => {
                self.element(token)?;
            }
            Kind::Close => {
                let Some(frame) = self.stack.pop() else {
                    return Err(ParseError::unbalanced_tag(self.source, token.bytes(self.input)));
                };
                self.nodes[frame.node as usize].span = Span::between(frame.start, token.span.end());
            }
            Kind::Text | Kind::Data => {
                let parent = self.current();
                self.append_child(parent, XmlNode::text(token.kind, parent, token.span));
            }
            Kind::Document | Kind::Attribute | Kind::Undefined => {
                return Err(ParseError::unclassifiable_span(self.source, token.bytes(self.input)));
            }
        }
        Ok(())
    }

    /// Fails when an element is still open
    pub fn finish(&self) -> Result<(), ParseError> {
        match self.stack.first() {
            Some(frame) => Err(ParseError::unbalanced_tag(self.source, &self.input[frame.start..])),
            None => Ok(()),
        }
    }

    /// Build the element for a markup token and attach it to the current node
    fn element(&mut self, token: Token) -> Result<NodeId, ParseError> {
        let tag = token.bytes(self.input);
        let end = attribute_region_end(token.kind, tag);
        let name_start = token.kind.name_offset().min(end);
        let name_end = class_run(tag, name_start, end, is_identifier_char).map_or(name_start, |l| l + 1);
        let name = String::from_utf8_lossy(&tag[name_start..name_end]).into_owned();

        let attributes = if token.kind.has_attributes() {
            self.attributes(token.span, name_end, end)?
        } else {
            Vec::new()
        };

        let parent = self.current();
        let id = self.append_child(parent, XmlNode::element(token.kind, name, parent, token.span));
        for attr in attributes {
            let attr_id = self.push_node(XmlNode::attribute(attr.name, attr.value, id, attr.span));
            self.nodes[id as usize].push_attribute(attr_id);
        }
        Ok(id)
    }

    /// Parse the whitespace separated attribute list in `tag[x..end]`
    fn attributes(&self, tag_span: Span, mut x: usize, end: usize) -> Result<Vec<Attribute>, ParseError> {
        let tag = tag_span.slice(self.input);
        let mut attributes = Vec::new();
        while let Some(ws) = class_run(tag, x, end, is_whitespace) {
            x = ws + 1;
            if x >= end || is_tag_boundary(tag[x]) {
                break;
            }
            let Some(attr_end) = attribute_extent(tag, x, end) else {
                break;
            };
            attributes.push(parse_attribute(self.source, self.input, tag_span.sub(x, attr_end))?);
            x = attr_end;
        }
        Ok(attributes)
    }
}

/// End (exclusive) of the name and attribute region of a tag: everything
/// before the closing `>`, `/>` or `?>`.
fn attribute_region_end(kind: Kind, tag: &[u8]) -> usize {
    let gt = tag.len().saturating_sub(1);
    let closer = match kind {
        Kind::Solitary => 1,
        Kind::Instruction if gt > 2 && tag[gt - 1] == b'?' => 1,
        _ => 0,
    };
    gt - closer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::Tokenizer;
    use pretty_assertions::assert_eq;

    fn parse(input: &[u8]) -> Result<Document<'_>, ParseError> {
        Document::parse("test", input)
    }

    fn child_kinds(doc: &Document<'_>, id: NodeId) -> Vec<Kind> {
        doc.children(id).map(|c| doc.kind(c)).collect()
    }

    #[test]
    fn test_scenario_element_with_attribute_and_mixed_children() {
        let doc = parse(b"<a x=\"1\"><b/>text</a>").unwrap();
        assert_eq!(doc.child_count(DOCUMENT_ID), 1);

        let a = doc.child(DOCUMENT_ID, 0).unwrap();
        assert_eq!(doc.name(a), Some("a"));
        assert_eq!(doc.attribute_pairs(a), vec![("x", "1")]);
        assert_eq!(child_kinds(&doc, a), vec![Kind::Solitary, Kind::Text]);

        let b = doc.child(a, 0).unwrap();
        assert_eq!(doc.name(b), Some("b"));
        assert_eq!(doc.child_count(b), 0);
        assert_eq!(doc.content(doc.child(a, 1).unwrap()), b"text");
    }

    #[test]
    fn test_scenario_instruction_and_solitary_root() {
        let doc = parse(b"<?xml version=\"1.0\"?><root/>").unwrap();
        assert_eq!(child_kinds(&doc, DOCUMENT_ID), vec![Kind::Instruction, Kind::Solitary]);

        let pi = doc.child(DOCUMENT_ID, 0).unwrap();
        assert_eq!(doc.name(pi), Some("xml"));
        assert_eq!(doc.attribute_pairs(pi), vec![("version", "1.0")]);

        let root = doc.child(DOCUMENT_ID, 1).unwrap();
        assert_eq!(doc.name(root), Some("root"));
        assert_eq!(doc.root_element(), Some(root));
    }

    #[test]
    fn test_scenario_unbalanced() {
        let err = parse(b"<a><b></a>").unwrap_err();
        assert!(matches!(err, ParseError::UnbalancedTag { .. }));
        assert_eq!(err.span(), b"<a><b></a>");
    }

    #[test]
    fn test_scenario_empty_input() {
        assert_eq!(parse(b"").unwrap_err(), ParseError::empty_input("test"));
    }

    #[test]
    fn test_scenario_whitespace_body() {
        let doc = parse(b"<a>   </a>").unwrap();
        let a = doc.root_element().unwrap();
        assert_eq!(doc.name(a), Some("a"));
        assert_eq!(doc.child_count(a), 0);
    }

    #[test]
    fn test_stray_close_is_unbalanced() {
        let err = parse(b"<a/></b>").unwrap_err();
        assert_eq!(err, ParseError::unbalanced_tag("test", b"</b>"));
    }

    #[test]
    fn test_open_element_span_covers_body() {
        let input = b"<r><a k='v'>x<b/>y</a></r>";
        let doc = parse(input).unwrap();
        let r = doc.root_element().unwrap();
        let a = doc.child(r, 0).unwrap();
        assert_eq!(doc.content(r), &input[..]);
        assert_eq!(doc.content(a), b"<a k='v'>x<b/>y</a>");
        assert_eq!(doc.kind(a), Kind::Open);
    }

    #[test]
    fn test_children_reassemble_body() {
        let input = b"<r>one<a>two<b/>three</a><![CDATA[four]]>five<c/></r>";
        let doc = parse(input).unwrap();
        let r = doc.root_element().unwrap();
        let body: Vec<u8> = doc.children(r).flat_map(|c| doc.content(c).iter().copied()).collect();
        assert_eq!(body, &input[3..input.len() - 4]);
    }

    #[test]
    fn test_nesting_depths() {
        let doc = parse(b"<a><b><c><d/></c></b></a>").unwrap();
        for id in doc.descendants(DOCUMENT_ID) {
            let parent = doc.get_node(id).unwrap().parent.unwrap();
            if doc.kind(parent) == Kind::Open {
                assert_eq!(doc.depth(id), doc.depth(parent) + 1);
            }
        }
        let d = doc.descendants(DOCUMENT_ID).find(|&id| doc.name(id) == Some("d")).unwrap();
        assert_eq!(doc.depth(d), 4);
    }

    #[test]
    fn test_open_element_bodies_balance() {
        let doc = parse(b"<a><b><c/>t</b><b></b></a>").unwrap();
        for id in doc.descendants(DOCUMENT_ID) {
            if doc.kind(id) != Kind::Open {
                continue;
            }
            let raw = doc.content(id);
            let depth: i32 = Tokenizer::new(raw)
                .map(|t| match t.kind {
                    Kind::Open => 1,
                    Kind::Close => -1,
                    _ => 0,
                })
                .sum();
            assert_eq!(depth, 0);
        }
    }

    #[test]
    fn test_head_and_trailing_text() {
        let doc = parse(b"lead<!DOCTYPE note SYSTEM \"note.dtd\"><note/>trail").unwrap();
        assert_eq!(
            child_kinds(&doc, DOCUMENT_ID),
            vec![Kind::Text, Kind::Declaration, Kind::Solitary, Kind::Text]
        );
        let decl = doc.child(DOCUMENT_ID, 1).unwrap();
        assert_eq!(doc.name(decl), Some("DOCTYPE"));
        assert_eq!(
            doc.attribute_pairs(decl),
            vec![("note", ""), ("SYSTEM", ""), ("", "note.dtd")]
        );
    }

    #[test]
    fn test_multiple_top_level_elements() {
        let doc = parse(b"<a></a><b></b>").unwrap();
        assert_eq!(child_kinds(&doc, DOCUMENT_ID), vec![Kind::Open, Kind::Open]);
    }

    #[test]
    fn test_attribute_error_propagates() {
        let err = parse(b"<r><a x=\"1></a></r>").unwrap_err();
        assert!(matches!(err, ParseError::AttributeQuoteMismatch { .. }));

        let err = parse(b"<r><a x=></a></r>").unwrap_err();
        assert_eq!(err, ParseError::attribute_syntax("test", b"x="));
    }

    #[test]
    fn test_quoted_value_with_equals_and_other_quote() {
        let doc = parse(b"<q a='x=\"y\"' b=\"it's\"/>").unwrap();
        let q = doc.root_element().unwrap();
        assert_eq!(doc.attribute_pairs(q), vec![("a", "x=\"y\""), ("b", "it's")]);
    }

    #[test]
    fn test_solitary_with_bare_value() {
        let doc = parse(b"<img w=10 h=20/>").unwrap();
        let img = doc.root_element().unwrap();
        assert_eq!(doc.attribute_pairs(img), vec![("w", "10"), ("h", "20")]);
    }

    #[test]
    fn test_attribute_list_stops_at_unknown_byte() {
        let doc = parse(b"<a x=\"1\" @y></a>").unwrap();
        let a = doc.root_element().unwrap();
        assert_eq!(doc.attribute_pairs(a), vec![("x", "1")]);
    }

    #[test]
    fn test_attribute_nodes_point_at_element() {
        let doc = parse(b"<a id=\"1\"><b/></a>").unwrap();
        let a = doc.root_element().unwrap();
        let attr = doc.attribute(a, 0).unwrap();
        assert_eq!(doc.get_node(attr).unwrap().parent, Some(a));
        // attributes are not children
        assert_eq!(child_kinds(&doc, a), vec![Kind::Solitary]);
    }

    #[test]
    fn test_close_names_are_not_compared() {
        let doc = parse(b"<a><b></c></a>").unwrap();
        let a = doc.root_element().unwrap();
        assert_eq!(doc.child_count(a), 1);
    }

    #[test]
    fn test_push_token_rejects_synthetic_kinds() {
        let input = b"<a/>";
        let mut builder = TreeBuilder::new("test", input);
        let token = Token {
            kind: Kind::Attribute,
            span: Span::new(0, 4),
        };
        assert!(matches!(
            builder.push_token(token),
            Err(ParseError::UnclassifiableSpan { .. })
        ));
    }
}
