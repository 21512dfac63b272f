//! Span - offset and length into original input
//!
//! Zero-copy reference to a portion of the input document.
//! Used for tokens, element tags, attribute text and text content.

/// Longest diagnostic preview, in bytes
pub const PREVIEW_LIMIT: usize = 20;

/// A span referencing a portion of the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Byte offset into the original input
    pub offset: u32,
    /// Length in bytes
    pub len: u32,
}

impl Span {
    /// Create a new span
    #[inline]
    pub const fn new(offset: u32, len: u32) -> Self {
        Self { offset, len }
    }

    /// Span covering `start..end` (exclusive end)
    #[inline]
    pub fn between(start: usize, end: usize) -> Self {
        Self::new(start as u32, end.saturating_sub(start) as u32)
    }

    /// Check if this span is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the start offset
    #[inline]
    pub const fn start(&self) -> usize {
        self.offset as usize
    }

    /// Get the end offset (exclusive)
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset as usize + self.len as usize
    }

    /// Extract the byte slice from input
    #[inline]
    pub fn slice<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        input.get(self.start()..self.end()).unwrap_or(&[])
    }

    /// Sub-span relative to this span's start
    #[inline]
    pub fn sub(&self, start: usize, end: usize) -> Self {
        Self::between(self.start() + start, self.start() + end)
    }
}

/// Render a short diagnostic string: the first line, clamped to
/// [`PREVIEW_LIMIT`] bytes.
pub fn preview(bytes: &[u8]) -> String {
    let line = match memchr::memchr(b'\n', bytes) {
        Some(nl) => &bytes[..nl],
        None => bytes,
    };
    let clamped = &line[..line.len().min(PREVIEW_LIMIT)];
    String::from_utf8_lossy(clamped).into_owned()
}
