//! TagTree - span-based XML tree parsing
//!
//! Pipeline:
//! 1. Tokenizer: split the buffer into `<...>` code spans and text spans
//! 2. Kind: classify each span (declaration, instruction, open, solitary,
//!    close, text, CDATA) and drop whitespace-only ones
//! 3. Builder: assemble an arena tree with an explicit open-element stack,
//!    parsing each tag's name and attribute list on the way
//!
//! The crate is usable as a plain Rust library and as an Erlang NIF.

use rustler::{Binary, Encoder, Env, NifResult, Term};

pub mod batch;
pub mod core;
pub mod dom;
pub mod error;
pub mod loader;
mod term;

pub use crate::core::kind::{classify, Kind};
pub use crate::core::span::Span;
pub use crate::dom::{dump, Document, NodeId};
pub use crate::error::ParseError;
pub use crate::loader::{LoadError, Loaded};

use term::{document_to_term, load_error_to_term, parse_error_to_term, str_to_binary};

// ============================================================================
// Allocator Configuration
// ============================================================================

#[cfg(feature = "memory_tracking")]
mod tracking {
    use std::alloc::{GlobalAlloc, Layout};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub static ALLOCATED: AtomicUsize = AtomicUsize::new(0);
    pub static PEAK_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

    pub struct TrackingAllocator;

    #[cfg(feature = "mimalloc")]
    static UNDERLYING: mimalloc::MiMalloc = mimalloc::MiMalloc;

    #[cfg(not(feature = "mimalloc"))]
    static UNDERLYING: std::alloc::System = std::alloc::System;

    unsafe impl GlobalAlloc for TrackingAllocator {
        unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
            let ptr = UNDERLYING.alloc(layout);
            if !ptr.is_null() {
                let current = ALLOCATED.fetch_add(layout.size(), Ordering::Relaxed) + layout.size();
                PEAK_ALLOCATED.fetch_max(current, Ordering::Relaxed);
            }
            ptr
        }

        unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
            ALLOCATED.fetch_sub(layout.size(), Ordering::Relaxed);
            UNDERLYING.dealloc(ptr, layout)
        }
    }

    /// (current, peak) in bytes
    pub fn snapshot() -> (usize, usize) {
        (
            ALLOCATED.load(Ordering::SeqCst),
            PEAK_ALLOCATED.load(Ordering::SeqCst),
        )
    }

    /// Reset the peak to the current value, returning the old (current, peak)
    pub fn reset() -> (usize, usize) {
        let current = ALLOCATED.load(Ordering::SeqCst);
        let peak = PEAK_ALLOCATED.swap(current, Ordering::SeqCst);
        (current, peak)
    }
}

#[cfg(not(feature = "memory_tracking"))]
mod tracking {
    pub fn snapshot() -> (usize, usize) {
        (0, 0)
    }

    pub fn reset() -> (usize, usize) {
        (0, 0)
    }
}

#[cfg(feature = "memory_tracking")]
#[global_allocator]
static GLOBAL: tracking::TrackingAllocator = tracking::TrackingAllocator;

#[cfg(all(feature = "mimalloc", not(feature = "memory_tracking")))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// ============================================================================
// Memory Tracking NIFs
// ============================================================================

#[rustler::nif]
fn get_rust_memory() -> usize {
    tracking::snapshot().0
}

#[rustler::nif]
fn get_rust_memory_peak() -> usize {
    tracking::snapshot().1
}

#[rustler::nif]
fn reset_rust_memory_stats() -> (usize, usize) {
    tracking::reset()
}

// ============================================================================
// Parsing NIFs
// ============================================================================

fn document_result<'a>(env: Env<'a>, result: Result<Document<'_>, ParseError>) -> Term<'a> {
    match result {
        Ok(doc) => (rustler::types::atom::ok(), document_to_term(env, &doc)).encode(env),
        Err(err) => parse_error_to_term(env, &err),
    }
}

/// Parse a binary into `{:ok, {:document, source, children}}` or
/// `{:error, {reason, source, span}}`
#[rustler::nif]
fn parse<'a>(env: Env<'a>, input: Binary<'a>, source: &str) -> NifResult<Term<'a>> {
    Ok(document_result(env, Document::parse(source, input.as_slice())))
}

/// Read and parse a file; loader failures are `{:error, {reason, path, detail}}`
#[rustler::nif(schedule = "DirtyIo")]
fn parse_file<'a>(env: Env<'a>, path: &str) -> NifResult<Term<'a>> {
    let loaded = match Loaded::read(path) {
        Ok(loaded) => loaded,
        Err(err) => return Ok(load_error_to_term(env, &err)),
    };
    Ok(document_result(env, loaded.parse()))
}

/// Parse many `{source, binary}` pairs in parallel
#[rustler::nif(schedule = "DirtyCpu")]
fn parse_many<'a>(env: Env<'a>, inputs: Vec<(&'a str, Binary<'a>)>) -> NifResult<Term<'a>> {
    let pairs: Vec<(&str, &[u8])> = inputs
        .iter()
        .map(|(source, input)| (*source, input.as_slice()))
        .collect();

    let mut list = Term::list_new_empty(env);
    for result in batch::parse_many(&pairs).into_iter().rev() {
        list = list.list_prepend(document_result(env, result));
    }
    Ok(list)
}

/// Render the indented dump of a parsed binary
#[rustler::nif]
fn dump_tree<'a>(env: Env<'a>, input: Binary<'a>, source: &str) -> NifResult<Term<'a>> {
    Ok(match Document::parse(source, input.as_slice()) {
        Ok(doc) => (rustler::types::atom::ok(), str_to_binary(env, &dump(&doc))).encode(env),
        Err(err) => parse_error_to_term(env, &err),
    })
}

// ============================================================================
// NIF Initialization
// ============================================================================

rustler::init!("Elixir.TagTree.Native");
