use std::fmt;

use crate::foundation::core::CharRange;

/// Convenience result type used across glyphfx.
pub type GlyphFxResult<T> = Result<T, GlyphFxError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum GlyphFxError {
    /// Markup could not be turned into a document tree.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A timeline request referenced characters that do not exist.
    #[error("timeline error: {0}")]
    Timeline(#[from] TimelineError),

    /// A tag handler failed while building modifiers or timeline requests.
    #[error("handler error in tag '{tag}': {source}")]
    Handler {
        /// Name of the tag whose handler failed.
        tag: String,
        /// Underlying handler failure.
        #[source]
        source: HandlerError,
    },

    /// Invalid document construction (bad attach, unknown node id).
    #[error("document error: {0}")]
    Document(String),

    /// Invalid host configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphFxError {
    /// Build a [`GlyphFxError::Document`] value.
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    /// Build a [`GlyphFxError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`GlyphFxError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`GlyphFxError::Handler`] value for the named tag.
    pub fn handler(tag: impl Into<String>, source: HandlerError) -> Self {
        Self::Handler {
            tag: tag.into(),
            source,
        }
    }
}

/// Markup failure reported by a [`TagParser`](crate::TagParser), located by byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset into the markup where the problem was detected.
    pub offset: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at byte {}: {}", self.offset, self.kind)
    }
}

impl std::error::Error for ParseError {}

/// Classification of a [`ParseError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A tag delimiter was opened but never closed.
    UnterminatedTag,
    /// A quoted attribute value ran to the end of the input.
    UnterminatedQuote,
    /// Tag name is empty or contains characters outside the grammar.
    InvalidTagName(String),
    /// Attribute syntax is malformed.
    InvalidAttribute(String),
    /// A closing tag does not match the innermost open tag.
    MismatchedClose {
        /// Name of the innermost open tag.
        expected: String,
        /// Name found in the closing tag.
        found: String,
    },
    /// A closing tag appeared with no open tag.
    UnexpectedClose(String),
    /// Input ended while a tag was still open.
    UnclosedTag(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedTag => write!(f, "unterminated tag"),
            Self::UnterminatedQuote => write!(f, "unterminated quoted attribute value"),
            Self::InvalidTagName(name) => write!(f, "invalid tag name \"{name}\""),
            Self::InvalidAttribute(msg) => write!(f, "invalid attribute: {msg}"),
            Self::MismatchedClose { expected, found } => {
                write!(f, "closing tag '{found}' does not match open tag '{expected}'")
            }
            Self::UnexpectedClose(name) => write!(f, "closing tag '{name}' has no open tag"),
            Self::UnclosedTag(name) => write!(f, "tag '{name}' is never closed"),
        }
    }
}

/// Rejected timeline request, reported when the schedule is finalized.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TimelineError {
    /// Range end exceeds the character count.
    #[error("range {range} is out of bounds for {char_count} characters")]
    RangeOutOfBounds {
        /// Offending range.
        range: CharRange,
        /// Number of character slots in the document.
        char_count: usize,
    },
    /// Range starts after it ends.
    #[error("range {range} starts after it ends")]
    InvertedRange {
        /// Offending range.
        range: CharRange,
    },
    /// Pause index is past the end of the text.
    #[error("pause at index {index} is out of bounds for {char_count} characters")]
    PauseOutOfBounds {
        /// Offending index.
        index: usize,
        /// Number of character slots in the document.
        char_count: usize,
    },
    /// Durations must be finite and non-negative; speed factors finite and positive.
    #[error("invalid {what}: {value}")]
    InvalidValue {
        /// Which request parameter was rejected.
        what: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Failure raised by a tag handler.
#[derive(thiserror::Error, Debug)]
pub enum HandlerError {
    /// A required attribute is absent.
    #[error("missing attribute '{0}'")]
    MissingAttribute(String),

    /// An attribute value could not be interpreted.
    #[error("invalid value \"{value}\" for attribute '{name}': {reason}")]
    InvalidAttribute {
        /// Attribute name.
        name: String,
        /// Raw attribute value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Any other failure from a third-party handler.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    /// Build a [`HandlerError::InvalidAttribute`] value.
    pub fn invalid_attribute(
        name: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            name: name.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
