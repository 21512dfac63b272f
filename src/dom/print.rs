//! Indented tree dump
//!
//! One line per node: `{index:03o}\t{kind}\t{description}`. Document children
//! are listed in full; below that only markup children are listed, indented
//! by their parent's depth in tabs.

use std::fmt::Write;

use super::document::Document;
use super::node::{NodeId, DOCUMENT_ID};
use crate::core::kind::Kind;

/// Render the whole document
pub fn dump(doc: &Document<'_>) -> String {
    let mut out = String::new();
    for (index, child) in doc.children(DOCUMENT_ID).enumerate() {
        line(doc, &mut out, "", index, child);
        dump_element(doc, &mut out, child);
    }
    out
}

fn dump_element(doc: &Document<'_>, out: &mut String, id: NodeId) {
    let indent = "\t".repeat(doc.depth(id));
    for (index, child) in doc.children(id).enumerate() {
        if matches!(
            doc.kind(child),
            Kind::Declaration | Kind::Instruction | Kind::Open | Kind::Solitary
        ) {
            line(doc, out, &indent, index, child);
            dump_element(doc, out, child);
        }
    }
}

#[inline]
fn line(doc: &Document<'_>, out: &mut String, indent: &str, index: usize, id: NodeId) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "{indent}{index:03o}\t{}\t{}", doc.kind(id), doc.describe(id));
}
