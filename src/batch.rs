//! Parallel Batch Parsing
//!
//! Uses Rayon to parse independent buffers at once. Each document is still
//! built by one single-threaded pass.

use rayon::prelude::*;

use crate::dom::Document;
use crate::error::ParseError;

/// Parse `(source, input)` pairs in parallel; results keep input order
pub fn parse_many<'a>(inputs: &[(&str, &'a [u8])]) -> Vec<Result<Document<'a>, ParseError>> {
    inputs
        .par_iter()
        .map(|&(source, input)| Document::parse(source, input))
        .collect()
}
