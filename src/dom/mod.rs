//! DOM Module - Arena-based XML Document
//!
//! Implements the document tree using:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for parent and child links
//! - An explicit open-element stack during construction
//! - A tab-indented dump for diagnostics

pub mod builder;
pub mod document;
pub mod node;
pub mod print;

pub use document::{DescendantIter, Document};
pub use node::{NodeData, NodeId, XmlNode, DOCUMENT_ID};
pub use print::dump;
