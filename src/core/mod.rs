//! Core XML parsing primitives
//!
//! This module contains the building blocks for span-based parsing:
//! - Scanner: byte classes and memchr-backed scanning primitives
//! - Span: zero-copy offset/length references into the input
//! - Kind: structural classification of a raw span
//! - Tokenizer: single pass split of the buffer into classified spans
//! - Attributes: attribute span extent and name/value parsing

pub mod attributes;
pub mod kind;
pub mod scanner;
pub mod span;
pub mod tokenizer;
