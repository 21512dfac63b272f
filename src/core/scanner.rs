//! Byte-class scanning primitives using memchr
//!
//! All functions operate on `buf[start..end]` and never read past `end`.
//! Indices returned are absolute positions in `buf`.

use memchr::{memchr, memrchr};

/// Byte class predicate
pub type ByteClass = fn(u8) -> bool;

/// Whitespace: space, tab, carriage return, line feed
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

/// Characters allowed in element and attribute names
#[inline]
pub fn is_identifier_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'+' | b'.' | b':')
}

/// Characters that may appear in a raw attribute token, quotes included
#[inline]
pub fn is_attribute_char(b: u8) -> bool {
    is_identifier_char(b)
        || matches!(
            b,
            b'=' | b'/' | b'\'' | b'"' | b'?' | b'%' | b'!' | b'#' | b'$' | b'(' | b')' | b'[' | b']' | b'*'
        )
}

/// Markup punctuation: `<`, `>`, `?`, `!`
#[inline]
pub fn is_tag_boundary(b: u8) -> bool {
    matches!(b, b'<' | b'>' | b'?' | b'!')
}

/// Single or double quote
#[inline]
pub fn is_quote(b: u8) -> bool {
    b == b'"' || b == b'\''
}

#[inline]
fn clamp(buf: &[u8], start: usize, end: usize) -> Option<(usize, usize)> {
    let end = end.min(buf.len());
    (start < end).then_some((start, end))
}

/// Index of the last byte of the run starting at `start` whose bytes all
/// satisfy `class`. `None` when the byte at `start` fails (or is out of range).
pub fn class_run(buf: &[u8], start: usize, end: usize, class: ByteClass) -> Option<usize> {
    let (start, end) = clamp(buf, start, end)?;
    if !class(buf[start]) {
        return None;
    }
    let len = buf[start..end]
        .iter()
        .position(|&b| !class(b))
        .unwrap_or(end - start);
    Some(start + len - 1)
}

/// First occurrence of `target` at or after `start`
#[inline]
pub fn scan_to(buf: &[u8], start: usize, end: usize, target: u8) -> Option<usize> {
    first_of(buf, start, end, target)
}

/// Index of the `close` byte matching an already consumed `open` byte.
///
/// Scanning begins at `start`, just past the opener. When `open == close`
/// (quotes) this is the next occurrence of the byte.
pub fn forward_balanced(buf: &[u8], start: usize, end: usize, open: u8, close: u8) -> Option<usize> {
    let (start, end) = clamp(buf, start, end)?;
    if open == close {
        return first_of(buf, start, end, close);
    }
    let mut depth = 0usize;
    for (i, &b) in buf[start..end].iter().enumerate() {
        if b == close {
            if depth == 0 {
                return Some(start + i);
            }
            depth -= 1;
        } else if b == open {
            depth += 1;
        }
    }
    None
}

/// First occurrence of `byte` in `buf[start..end]`
#[inline]
pub fn first_of(buf: &[u8], start: usize, end: usize, byte: u8) -> Option<usize> {
    let (start, end) = clamp(buf, start, end)?;
    memchr(byte, &buf[start..end]).map(|i| start + i)
}

/// Last occurrence of `byte` in `buf[start..end]`
#[inline]
pub fn last_of(buf: &[u8], start: usize, end: usize, byte: u8) -> Option<usize> {
    let (start, end) = clamp(buf, start, end)?;
    memrchr(byte, &buf[start..end]).map(|i| start + i)
}
