//! Attribute Parsing
//!
//! An attribute span is one of
//! - a bare name: `checked`
//! - `name=value`, where value is bare or quoted (`'...'` / `"..."`)
//! - a lone quoted value: `"..."`
//!
//! Quoted values may contain `=` and the other quote character.

use super::scanner::{class_run, forward_balanced, is_attribute_char, is_identifier_char, is_quote, is_whitespace};
use super::span::Span;
use crate::error::ParseError;

/// A parsed attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name, empty for a lone quoted value
    pub name: String,
    /// Attribute value with quotes stripped, empty for a bare name
    pub value: String,
    /// Raw attribute span in the input
    pub span: Span,
}

#[inline]
fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Interior of a quoted value; the last byte must repeat the first.
fn unquote<'a>(source: &str, raw: &[u8], quoted: &'a [u8]) -> Result<&'a [u8], ParseError> {
    match quoted {
        [open, inner @ .., close] if is_quote(*open) && open == close => Ok(inner),
        _ => Err(ParseError::attribute_quote_mismatch(source, raw)),
    }
}

/// Parse a single attribute span
pub fn parse_attribute(source: &str, input: &[u8], span: Span) -> Result<Attribute, ParseError> {
    let raw = span.slice(input);
    let Some(&first) = raw.first() else {
        return Err(ParseError::attribute_empty(source, raw));
    };

    if is_quote(first) {
        let value = unquote(source, raw, raw)?;
        if value.is_empty() {
            return Err(ParseError::attribute_empty(source, raw));
        }
        return Ok(Attribute {
            name: String::new(),
            value: lossy(value),
            span,
        });
    }

    let name_end = class_run(raw, 0, raw.len(), is_identifier_char).map_or(0, |last| last + 1);
    if name_end == raw.len() {
        return Ok(Attribute {
            name: lossy(raw),
            value: String::new(),
            span,
        });
    }
    if raw[name_end] != b'=' {
        return Err(ParseError::attribute_syntax(source, raw));
    }

    let name = &raw[..name_end];
    let rest = &raw[name_end + 1..];
    let value = match rest.first() {
        None => return Err(ParseError::attribute_syntax(source, raw)),
        Some(&q) if is_quote(q) => unquote(source, raw, rest)?,
        Some(_) => rest,
    };
    if name.is_empty() && value.is_empty() {
        return Err(ParseError::attribute_syntax(source, raw));
    }

    Ok(Attribute {
        name: lossy(name),
        value: lossy(value),
        span,
    })
}

/// End (exclusive) of a quoted run opened at `open`, or `end` when the quote
/// never closes.
#[inline]
fn quoted_end(tag: &[u8], open: usize, end: usize) -> usize {
    forward_balanced(tag, open + 1, end, tag[open], tag[open]).map_or(end, |q| q + 1)
}

/// Extent of the attribute starting at `x` inside `tag[..end]`.
///
/// Returns the exclusive end of the attribute span, or `None` when the byte
/// at `x` cannot start an attribute.
pub fn attribute_extent(tag: &[u8], x: usize, end: usize) -> Option<usize> {
    let first = *tag.get(x).filter(|_| x < end)?;

    if is_quote(first) {
        return Some(quoted_end(tag, x, end));
    }

    if let Some(last) = class_run(tag, x, end, is_identifier_char) {
        let y = last + 1;
        if y < end && tag[y] == b'=' {
            let v = y + 1;
            if v < end && is_quote(tag[v]) {
                return Some(quoted_end(tag, v, end));
            }
            return Some(class_run(tag, v, end, |b| !is_whitespace(b)).map_or(v, |l| l + 1));
        }
        return Some(y);
    }

    class_run(tag, x, end, is_attribute_char).map(|last| last + 1)
}
