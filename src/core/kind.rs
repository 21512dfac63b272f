//! Structural kind of a raw span
//!
//! Markup spans (`<` ... `>`) are distinguished by the byte after `<` and the
//! byte before `>`. Anything else is literal content.

use std::fmt;

use super::scanner::{class_run, is_whitespace};

/// Structural role of a span or tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Empty, whitespace-only or otherwise unclassifiable
    Undefined,
    /// Synthetic document root
    Document,
    /// Synthetic attribute node
    Attribute,
    /// `<!...>`
    Declaration,
    /// `<?...>`
    Instruction,
    /// `<name ...>`
    Open,
    /// `<name .../>`
    Solitary,
    /// `</name>`
    Close,
    /// Literal character data
    Text,
    /// `<![CDATA[...]]>`
    Data,
}

impl Kind {
    /// Markup delimited by `<` and `>`
    #[inline]
    pub fn is_code(self) -> bool {
        matches!(
            self,
            Kind::Declaration | Kind::Instruction | Kind::Open | Kind::Solitary | Kind::Close
        )
    }

    /// Literal content (text or CDATA)
    #[inline]
    pub fn is_text(self) -> bool {
        matches!(self, Kind::Text | Kind::Data)
    }

    /// Offset of the tag name inside a markup span
    #[inline]
    pub fn name_offset(self) -> usize {
        match self {
            Kind::Declaration | Kind::Instruction | Kind::Close => 2,
            Kind::Open | Kind::Solitary => 1,
            _ => 0,
        }
    }

    /// Whether tags of this kind carry an attribute list
    #[inline]
    pub fn has_attributes(self) -> bool {
        matches!(
            self,
            Kind::Declaration | Kind::Instruction | Kind::Open | Kind::Solitary
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Kind::Declaration => "<DECL>",
            Kind::Instruction => "<INSTR>",
            Kind::Document => "<DOC>",
            Kind::Attribute => "<ATTR>",
            Kind::Open => "<OPEN>",
            Kind::Solitary => "<SOL>",
            Kind::Close => "<CLOSE>",
            Kind::Text => "<TEXT>",
            Kind::Data => "<DATA>",
            Kind::Undefined => "<UNKN>",
        };
        f.write_str(tag)
    }
}

/// Classify a raw span
pub fn classify(span: &[u8]) -> Kind {
    let len = span.len();
    if len == 0 {
        return Kind::Undefined;
    }

    let last = len - 1;
    if span[0] == b'<' && span[last] == b'>' {
        // `<>` and a lone `<`/`>` pair have nothing to classify
        if len < 3 {
            return Kind::Undefined;
        }
        return match span[1] {
            b'?' => Kind::Instruction,
            b'!' if span.get(2) == Some(&b'[') => Kind::Data,
            b'!' => Kind::Declaration,
            b'/' => Kind::Close,
            _ if len > 3 && span[last - 1] == b'/' => Kind::Solitary,
            _ => Kind::Open,
        };
    }

    match class_run(span, 0, len, is_whitespace) {
        Some(end) if end == last => Kind::Undefined,
        _ => Kind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_markup() {
        assert_eq!(classify(b"<?xml version=\"1.0\"?>"), Kind::Instruction);
        assert_eq!(classify(b"<!DOCTYPE html>"), Kind::Declaration);
        assert_eq!(classify(b"<![CDATA[x < y]]>"), Kind::Data);
        assert_eq!(classify(b"</a>"), Kind::Close);
        assert_eq!(classify(b"<b/>"), Kind::Solitary);
        assert_eq!(classify(b"<a x=\"1\">"), Kind::Open);
        assert_eq!(classify(b"<a>"), Kind::Open);
    }

    #[test]
    fn test_classify_text() {
        assert_eq!(classify(b"text"), Kind::Text);
        assert_eq!(classify(b"  padded "), Kind::Text);
        assert_eq!(classify(b"<unterminated"), Kind::Text);
        assert_eq!(classify(b"x"), Kind::Text);
    }

    #[test]
    fn test_classify_undefined() {
        assert_eq!(classify(b""), Kind::Undefined);
        assert_eq!(classify(b" \r\n\t "), Kind::Undefined);
        assert_eq!(classify(b"<>"), Kind::Undefined);
    }

    #[test]
    fn test_slash_only_tag_is_close() {
        // `</>` starts with `/`, so it never reads as solitary
        assert_eq!(classify(b"</>"), Kind::Close);
    }

    #[test]
    fn test_kind_facets() {
        assert!(Kind::Open.is_code());
        assert!(!Kind::Open.is_text());
        assert!(Kind::Data.is_text());
        assert!(!Kind::Document.is_code());
        assert_eq!(Kind::Instruction.name_offset(), 2);
        assert_eq!(Kind::Solitary.name_offset(), 1);
        assert!(!Kind::Close.has_attributes());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(Kind::Open.to_string(), "<OPEN>");
        assert_eq!(Kind::Solitary.to_string(), "<SOL>");
        assert_eq!(Kind::Undefined.to_string(), "<UNKN>");
    }
}
