//! Elixir Term Conversion Utilities
//!
//! Converts documents and errors to Elixir terms.

use rustler::{Encoder, Env, NewBinary, Term};

use crate::core::kind::Kind;
use crate::dom::{Document, NodeData, NodeId, DOCUMENT_ID};
use crate::error::ParseError;
use crate::loader::LoadError;

// Pre-defined atoms for efficiency - created once at compile time
rustler::atoms! {
    document,
    element,
    declaration,
    instruction,
    cdata,
    empty_input,
    attribute_empty,
    attribute_quote_mismatch,
    attribute_syntax,
    unbalanced_tag,
    unclassifiable_span,
    stat,
    read,
    short_read,
}

/// Convert a document to `{:document, source, children}`
pub fn document_to_term<'a>(env: Env<'a>, doc: &Document<'_>) -> Term<'a> {
    let children = children_to_term(env, doc, DOCUMENT_ID);
    (document(), str_to_binary(env, doc.source()), children).encode(env)
}

/// Convert a node to an Elixir term
///
/// - Open/Solitary: `{:element, name, attrs, children}`
/// - Declaration: `{:declaration, name, attrs}`
/// - Instruction: `{:instruction, name, attrs}`
/// - Text: binary
/// - CDATA: `{:cdata, inner}`
pub fn node_to_term<'a>(env: Env<'a>, doc: &Document<'_>, id: NodeId) -> Term<'a> {
    let Some(node) = doc.get_node(id) else {
        return rustler::types::atom::nil().encode(env);
    };

    match &node.data {
        NodeData::Document { .. } => document_to_term(env, doc),
        NodeData::Element { kind, name, .. } => {
            let name_term = str_to_binary(env, name);
            let attrs = attributes_to_term(env, doc, id);
            match kind {
                Kind::Declaration => (declaration(), name_term, attrs).encode(env),
                Kind::Instruction => (instruction(), name_term, attrs).encode(env),
                _ => {
                    let children = children_to_term(env, doc, id);
                    (element(), name_term, attrs, children).encode(env)
                }
            }
        }
        NodeData::Attribute { name, value } => {
            (str_to_binary(env, name), str_to_binary(env, value)).encode(env)
        }
        NodeData::Text { kind: Kind::Data } => {
            let inner = doc.text(id).unwrap_or_default();
            (cdata(), bytes_to_binary(env, inner)).encode(env)
        }
        NodeData::Text { .. } => bytes_to_binary(env, doc.content(id)),
    }
}

/// Build a list of child terms, in reverse so prepending keeps order
fn children_to_term<'a>(env: Env<'a>, doc: &Document<'_>, id: NodeId) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    let count = doc.child_count(id);
    for index in (0..count).rev() {
        if let Some(child) = doc.child(id, index) {
            list = list.list_prepend(node_to_term(env, doc, child));
        }
    }
    list
}

/// Attributes as a list of `{name, value}` tuples
fn attributes_to_term<'a>(env: Env<'a>, doc: &Document<'_>, id: NodeId) -> Term<'a> {
    let mut list = Term::list_new_empty(env);
    for (name, value) in doc.attribute_pairs(id).into_iter().rev() {
        let pair = (str_to_binary(env, name), str_to_binary(env, value));
        list = list.list_prepend(pair.encode(env));
    }
    list
}

/// Convert a parse error to `{:error, {reason, source, span}}`
pub fn parse_error_to_term<'a>(env: Env<'a>, err: &ParseError) -> Term<'a> {
    let reason = match err {
        ParseError::EmptyInput { .. } => empty_input(),
        ParseError::AttributeEmpty { .. } => attribute_empty(),
        ParseError::AttributeQuoteMismatch { .. } => attribute_quote_mismatch(),
        ParseError::AttributeSyntax { .. } => attribute_syntax(),
        ParseError::UnbalancedTag { .. } => unbalanced_tag(),
        ParseError::UnclassifiableSpan { .. } => unclassifiable_span(),
    };
    let detail = (
        reason,
        str_to_binary(env, err.source_id()),
        bytes_to_binary(env, err.span()),
    );
    (rustler::types::atom::error(), detail).encode(env)
}

/// Convert a load error to `{:error, {reason, path, detail}}`
pub fn load_error_to_term<'a>(env: Env<'a>, err: &LoadError) -> Term<'a> {
    let (reason, path) = match err {
        LoadError::Parse(parse) => return parse_error_to_term(env, parse),
        LoadError::Stat { path, .. } => (stat(), path),
        LoadError::Read { path, .. } => (read(), path),
        LoadError::ShortRead { path, .. } => (short_read(), path),
    };
    let detail = (reason, str_to_binary(env, path), str_to_binary(env, &err.to_string()));
    (rustler::types::atom::error(), detail).encode(env)
}

/// Convert a string to a binary term (more efficient than .encode())
#[inline]
pub fn str_to_binary<'a>(env: Env<'a>, s: &str) -> Term<'a> {
    bytes_to_binary(env, s.as_bytes())
}

/// Copy bytes into a new binary term
#[inline]
pub fn bytes_to_binary<'a>(env: Env<'a>, bytes: &[u8]) -> Term<'a> {
    let mut binary = NewBinary::new(env, bytes.len());
    binary.as_mut_slice().copy_from_slice(bytes);
    binary.into()
}
