//! Parse error types.

use thiserror::Error;

use crate::core::span::preview;

/// Errors that can occur while building a document.
///
/// Every variant carries the diagnostic source identifier. Variants tied to a
/// region of the input also carry a copy of the offending bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input buffer has no bytes.
    #[error("{source_id}: empty input")]
    EmptyInput {
        /// Diagnostic source identifier.
        source_id: String,
    },

    /// An attribute span has no bytes, or holds nothing but a pair of quotes.
    #[error("{source_id}: empty attribute")]
    AttributeEmpty {
        /// Diagnostic source identifier.
        source_id: String,
        /// Offending bytes.
        span: Vec<u8>,
    },

    /// A quoted attribute is missing its matching closing quote.
    #[error("{source_id}: attribute quote mismatch in '{}'", preview(.span))]
    AttributeQuoteMismatch {
        /// Diagnostic source identifier.
        source_id: String,
        /// Offending bytes.
        span: Vec<u8>,
    },

    /// An attribute span is not `name`, `name=value` or a quoted value.
    #[error("{source_id}: attribute syntax in '{}'", preview(.span))]
    AttributeSyntax {
        /// Diagnostic source identifier.
        source_id: String,
        /// Offending bytes.
        span: Vec<u8>,
    },

    /// Open and close tags do not balance.
    #[error("{source_id}: unbalanced tag at '{}'", preview(.span))]
    UnbalancedTag {
        /// Diagnostic source identifier.
        source_id: String,
        /// Offending bytes.
        span: Vec<u8>,
    },

    /// A span reached the tree builder without a structural kind.
    #[error("{source_id}: unclassifiable span '{}'", preview(.span))]
    UnclassifiableSpan {
        /// Diagnostic source identifier.
        source_id: String,
        /// Offending bytes.
        span: Vec<u8>,
    },
}

impl ParseError {
    /// Creates an empty input error.
    pub fn empty_input(source_id: &str) -> Self {
        Self::EmptyInput {
            source_id: source_id.to_owned(),
        }
    }

    /// Creates an empty attribute error.
    pub fn attribute_empty(source_id: &str, span: &[u8]) -> Self {
        Self::AttributeEmpty {
            source_id: source_id.to_owned(),
            span: span.to_vec(),
        }
    }

    /// Creates a quote mismatch error.
    pub fn attribute_quote_mismatch(source_id: &str, span: &[u8]) -> Self {
        Self::AttributeQuoteMismatch {
            source_id: source_id.to_owned(),
            span: span.to_vec(),
        }
    }

    /// Creates an attribute syntax error.
    pub fn attribute_syntax(source_id: &str, span: &[u8]) -> Self {
        Self::AttributeSyntax {
            source_id: source_id.to_owned(),
            span: span.to_vec(),
        }
    }

    /// Creates an unbalanced tag error.
    pub fn unbalanced_tag(source_id: &str, span: &[u8]) -> Self {
        Self::UnbalancedTag {
            source_id: source_id.to_owned(),
            span: span.to_vec(),
        }
    }

    /// Creates an unclassifiable span error.
    pub fn unclassifiable_span(source_id: &str, span: &[u8]) -> Self {
        Self::UnclassifiableSpan {
            source_id: source_id.to_owned(),
            span: span.to_vec(),
        }
    }

    /// Stable snake_case tag for this error.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::EmptyInput { .. } => "empty_input",
            Self::AttributeEmpty { .. } => "attribute_empty",
            Self::AttributeQuoteMismatch { .. } => "attribute_quote_mismatch",
            Self::AttributeSyntax { .. } => "attribute_syntax",
            Self::UnbalancedTag { .. } => "unbalanced_tag",
            Self::UnclassifiableSpan { .. } => "unclassifiable_span",
        }
    }

    /// Diagnostic source identifier.
    pub fn source_id(&self) -> &str {
        match self {
            Self::EmptyInput { source_id }
            | Self::AttributeEmpty { source_id, .. }
            | Self::AttributeQuoteMismatch { source_id, .. }
            | Self::AttributeSyntax { source_id, .. }
            | Self::UnbalancedTag { source_id, .. }
            | Self::UnclassifiableSpan { source_id, .. } => source_id,
        }
    }

    /// Offending bytes, empty for [`ParseError::EmptyInput`].
    pub fn span(&self) -> &[u8] {
        match self {
            Self::EmptyInput { .. } => &[],
            Self::AttributeEmpty { span, .. }
            | Self::AttributeQuoteMismatch { span, .. }
            | Self::AttributeSyntax { span, .. }
            | Self::UnbalancedTag { span, .. }
            | Self::UnclassifiableSpan { span, .. } => span,
        }
    }
}
