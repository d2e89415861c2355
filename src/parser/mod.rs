use crate::document::node::Document;
use crate::foundation::error::ParseError;

pub(crate) mod curly;
pub(crate) mod lexer;

/// A markup grammar that produces a [`Document`].
///
/// The rest of the engine only depends on the tree shape, so several grammars can coexist and
/// the host picks one.
pub trait TagParser {
    /// Parse `markup` into a complete, attached document tree.
    fn parse(&self, markup: &str) -> Result<Document, ParseError>;
}
