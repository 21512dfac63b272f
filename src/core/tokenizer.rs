//! Span tokenizer
//!
//! One left-to-right pass over the buffer. At `<` the span runs through the
//! next `>` (a code span); anywhere else it runs up to, not including, the
//! next `<` (a text span). Spans that classify as [`Kind::Undefined`] are
//! dropped.

use super::kind::{classify, Kind};
use super::scanner::scan_to;
use super::span::Span;
use crate::error::ParseError;

/// A classified span of the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Structural kind
    pub kind: Kind,
    /// Location in the input
    pub span: Span,
}

impl Token {
    /// Raw bytes of this token
    #[inline]
    pub fn bytes<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        self.span.slice(input)
    }
}

/// Iterator over the classified spans of `input[pos..end]`
pub struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    end: usize,
}

impl<'a> Tokenizer<'a> {
    /// Tokenize the whole buffer
    pub fn new(input: &'a [u8]) -> Self {
        Self::range(input, 0, input.len())
    }

    /// Tokenize a sub-range of the buffer; token spans stay absolute
    pub fn range(input: &'a [u8], start: usize, end: usize) -> Self {
        Tokenizer {
            input,
            pos: start,
            end: end.min(input.len()),
        }
    }

    /// Current cursor position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// End offset (exclusive) of the next raw span, or `None` when no span
    /// can be formed at the cursor.
    fn span_end(&self) -> Option<usize> {
        let x = self.pos;
        if self.input[x] == b'<' {
            scan_to(self.input, x + 1, self.end, b'>').map(|gt| gt + 1)
        } else {
            Some(scan_to(self.input, x + 1, self.end, b'<').unwrap_or(self.end))
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.pos < self.end {
            let Some(end) = self.span_end() else {
                log::trace!("no span at offset {}, skipping one byte", self.pos);
                self.pos += 1;
                continue;
            };

            let span = Span::between(self.pos, end);
            self.pos = end;

            let kind = classify(span.slice(self.input));
            if kind == Kind::Undefined {
                log::trace!("dropped span {}..{}", span.start(), span.end());
                continue;
            }
            log::trace!("{} {}..{}", kind, span.start(), span.end());
            return Some(Token { kind, span });
        }
        None
    }
}

/// Tokenize a whole buffer into classified spans, in document order
pub fn tokenize(source: &str, input: &[u8]) -> Result<Vec<Token>, ParseError> {
    if input.is_empty() {
        return Err(ParseError::empty_input(source));
    }
    Ok(Tokenizer::new(input).collect())
}
