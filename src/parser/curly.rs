use crate::document::node::{Document, NodeId};
use crate::document::tag::TagNode;
use crate::foundation::error::{ParseError, ParseErrorKind};
use crate::parser::TagParser;
use crate::parser::lexer::{TokenKind, lex};

/// Curly-brace markup grammar.
///
/// - `{name}` ... `{/name}` wraps content in a tag; closing names match case-insensitively.
/// - `{name key=value key="quoted value" flag}` sets attributes; `{name=value}` stores the
///   value under the `value` attribute.
/// - `{name/}` is a self-closing tag with no children.
/// - `<...>` is rich-text markup passed through verbatim.
/// - `\{`, `\}`, `\<`, `\>` and `\\` escape the delimiters.
#[derive(Clone, Copy, Debug, Default)]
pub struct CurlyParser;

impl TagParser for CurlyParser {
    #[tracing::instrument(skip(self, markup), fields(len = markup.len()))]
    fn parse(&self, markup: &str) -> Result<Document, ParseError> {
        parse_curly(markup)
    }
}

/// Open tag waiting for its close; children are buffered so the node is built bottom-up.
struct Frame {
    tag: TagNode,
    open_markup: String,
    open_offset: usize,
    children: Vec<NodeId>,
}

fn parse_curly(markup: &str) -> Result<Document, ParseError> {
    let tokens = lex(markup)?;
    let mut doc = Document::new();
    let mut top_level: Vec<NodeId> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in tokens {
        let raw = &markup[token.span.start..token.span.end];
        let node = match token.kind {
            TokenKind::Text(text) => doc.new_text(text),
            TokenKind::Passthrough(verbatim) => doc.new_passthrough(verbatim),
            TokenKind::Open {
                name,
                attrs,
                self_closing,
            } => {
                let mut tag = TagNode::new(name);
                for (k, v) in attrs {
                    tag.set_attr(k, v);
                }
                if self_closing {
                    doc.new_tag(tag.with_markup(raw, None))
                } else {
                    stack.push(Frame {
                        tag,
                        open_markup: raw.to_owned(),
                        open_offset: token.span.start,
                        children: Vec::new(),
                    });
                    continue;
                }
            }
            TokenKind::Close { name } => {
                let Some(frame) = stack.pop() else {
                    return Err(ParseError::new(
                        token.span.start,
                        ParseErrorKind::UnexpectedClose(name),
                    ));
                };
                if !names_match(frame.tag.name(), &name) {
                    return Err(ParseError::new(
                        token.span.start,
                        ParseErrorKind::MismatchedClose {
                            expected: frame.tag.name().to_owned(),
                            found: name,
                        },
                    ));
                }
                let tag = frame.tag.with_markup(frame.open_markup, Some(raw.to_owned()));
                let id = doc.new_tag(tag);
                for child in frame.children {
                    doc.adopt(id, child);
                }
                id
            }
        };

        match stack.last_mut() {
            Some(frame) => frame.children.push(node),
            None => top_level.push(node),
        }
    }

    if let Some(frame) = stack.pop() {
        return Err(ParseError::new(
            frame.open_offset,
            ParseErrorKind::UnclosedTag(frame.tag.name().to_owned()),
        ));
    }

    let root = doc.root();
    for node in top_level {
        doc.adopt(root, node);
    }
    Ok(doc)
}

fn names_match(open: &str, close: &str) -> bool {
    open.to_lowercase() == close.to_lowercase()
}

#[cfg(test)]
#[path = "../../tests/unit/parser/curly.rs"]
mod tests;
