use crate::foundation::error::{ParseError, ParseErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub(crate) start: usize,
    pub(crate) end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    /// Literal characters with escapes already resolved.
    Text(String),
    /// `<...>` kept verbatim.
    Passthrough(String),
    Open {
        name: String,
        attrs: Vec<(String, String)>,
        self_closing: bool,
    },
    Close {
        name: String,
    },
}

/// Attribute key used for the `{name=value}` short form.
pub(crate) const SHORT_VALUE_KEY: &str = "value";

pub(crate) fn lex(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut out: Vec<Token> = Vec::new();
    let mut text = String::new();
    let mut text_start = 0usize;
    let mut i = 0usize;

    while let Some(c) = input[i..].chars().next() {
        match c {
            '\\' => {
                if text.is_empty() {
                    text_start = i;
                }
                let next = input[i + 1..].chars().next();
                match next {
                    Some(e @ ('{' | '}' | '<' | '>' | '\\')) => {
                        text.push(e);
                        i += 1 + e.len_utf8();
                    }
                    _ => {
                        text.push('\\');
                        i += 1;
                    }
                }
            }
            '<' => {
                flush_text(&mut out, &mut text, text_start, i);
                let end = input[i..]
                    .find('>')
                    .map(|rel| i + rel + 1)
                    .ok_or_else(|| ParseError::new(i, ParseErrorKind::UnterminatedTag))?;
                out.push(Token {
                    kind: TokenKind::Passthrough(input[i..end].to_owned()),
                    span: Span { start: i, end },
                });
                i = end;
            }
            '{' => {
                flush_text(&mut out, &mut text, text_start, i);
                let end = find_tag_end(input, i)?;
                let body = &input[i + 1..end - 1];
                out.push(Token {
                    kind: lex_tag_body(body, i + 1)?,
                    span: Span { start: i, end },
                });
                i = end;
            }
            _ => {
                if text.is_empty() {
                    text_start = i;
                }
                text.push(c);
                i += c.len_utf8();
            }
        }
    }
    flush_text(&mut out, &mut text, text_start, input.len());
    Ok(out)
}

fn flush_text(out: &mut Vec<Token>, text: &mut String, start: usize, end: usize) {
    if text.is_empty() {
        return;
    }
    out.push(Token {
        kind: TokenKind::Text(std::mem::take(text)),
        span: Span { start, end },
    });
}

/// Byte offset one past the `}` closing the tag opened at `open`. Braces inside quoted values
/// do not terminate the tag.
fn find_tag_end(input: &str, open: usize) -> Result<usize, ParseError> {
    let mut quote_start: Option<usize> = None;
    for (rel, c) in input[open + 1..].char_indices() {
        let pos = open + 1 + rel;
        match (c, quote_start) {
            ('"', None) => quote_start = Some(pos),
            ('"', Some(_)) => quote_start = None,
            ('}', None) => return Ok(pos + 1),
            ('{', None) => return Err(ParseError::new(open, ParseErrorKind::UnterminatedTag)),
            _ => {}
        }
    }
    match quote_start {
        Some(q) => Err(ParseError::new(q, ParseErrorKind::UnterminatedQuote)),
        None => Err(ParseError::new(open, ParseErrorKind::UnterminatedTag)),
    }
}

fn lex_tag_body(body: &str, base: usize) -> Result<TokenKind, ParseError> {
    if let Some(rest) = body.strip_prefix('/') {
        let name = rest.trim();
        validate_name(name, base + 1)?;
        return Ok(TokenKind::Close {
            name: name.to_owned(),
        });
    }

    let (body, self_closing) = match body.trim_end().strip_suffix('/') {
        Some(inner) => (inner, true),
        None => (body, false),
    };

    let mut cur = Cursor {
        src: body,
        pos: 0,
        base,
    };
    cur.skip_ws();
    let name_start = cur.pos;
    let name = cur.take_while(|c| !c.is_whitespace() && c != '=');
    validate_name(name, base + name_start)?;
    let name = name.to_owned();

    let mut attrs = Vec::new();
    if cur.eat('=') {
        let value = cur.value()?;
        attrs.push((SHORT_VALUE_KEY.to_owned(), value));
    }

    loop {
        let had_ws = cur.skip_ws();
        if cur.at_end() {
            break;
        }
        if !had_ws {
            return Err(cur.error(ParseErrorKind::InvalidAttribute(
                "attributes must be separated by whitespace".to_owned(),
            )));
        }
        let key = cur.take_while(|c| !c.is_whitespace() && c != '=' && c != '"');
        if key.is_empty() {
            return Err(cur.error(ParseErrorKind::InvalidAttribute(
                "expected attribute name".to_owned(),
            )));
        }
        let key = key.to_owned();
        let value = if cur.eat('=') {
            cur.value()?
        } else {
            String::new()
        };
        attrs.push((key, value));
    }

    Ok(TokenKind::Open {
        name,
        attrs,
        self_closing,
    })
}

fn validate_name(name: &str, offset: usize) -> Result<(), ParseError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '+' | '.' | ':'));
    if ok {
        Ok(())
    } else {
        Err(ParseError::new(
            offset,
            ParseErrorKind::InvalidTagName(name.to_owned()),
        ))
    }
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    base: usize,
}

impl<'a> Cursor<'a> {
    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) -> bool {
        let before = self.pos;
        self.take_while(char::is_whitespace);
        self.pos > before
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    fn value(&mut self) -> Result<String, ParseError> {
        if self.eat('"') {
            let v = self.take_while(|c| c != '"').to_owned();
            if !self.eat('"') {
                return Err(self.error(ParseErrorKind::UnterminatedQuote));
            }
            return Ok(v);
        }
        let v = self.take_while(|c| !c.is_whitespace() && c != '"');
        if v.is_empty() {
            return Err(self.error(ParseErrorKind::InvalidAttribute(
                "expected a value after '='".to_owned(),
            )));
        }
        Ok(v.to_owned())
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(self.base + self.pos, kind)
    }
}
