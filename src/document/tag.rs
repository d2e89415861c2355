use std::collections::BTreeMap;

use crate::document::node::NodeId;
use crate::foundation::core::Rgba;
use crate::foundation::error::HandlerError;

/// A named markup element: attributes plus an ordered list of owned children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagNode {
    name: String,
    attributes: BTreeMap<String, String>,
    pub(crate) children: Vec<NodeId>,
    open_markup: Option<String>,
    close_markup: Option<String>,
}

impl TagNode {
    /// Tag with the given name and no attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder form of [`TagNode::set_attr`].
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Record the source text of the opening and closing markup (used by the literal
    /// unknown-tag policy).
    pub fn with_markup(mut self, open: impl Into<String>, close: Option<String>) -> Self {
        self.open_markup = Some(open.into());
        self.close_markup = close;
        self
    }

    /// Insert an attribute; a duplicate name overwrites the earlier value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Tag name as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All attributes, keyed by name.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Child node ids in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Opening markup as it appeared in the source, if the parser recorded it.
    pub fn open_markup(&self) -> Option<&str> {
        self.open_markup.as_deref()
    }

    /// Closing markup as it appeared in the source; `None` for self-closing tags.
    pub fn close_markup(&self) -> Option<&str> {
        self.close_markup.as_deref()
    }

    /// Raw attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Raw attribute value, failing when absent.
    pub fn require_attr(&self, name: &str) -> Result<&str, HandlerError> {
        self.attr(name)
            .ok_or_else(|| HandlerError::MissingAttribute(name.to_owned()))
    }

    /// Attribute parsed as a finite float.
    pub fn attr_f64(&self, name: &str) -> Result<Option<f64>, HandlerError> {
        let Some(raw) = self.attr(name) else {
            return Ok(None);
        };
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(HandlerError::invalid_attribute(
                name,
                raw,
                "expected a finite number",
            )),
        }
    }

    /// Attribute parsed as a finite float, falling back to `default` when absent.
    pub fn attr_f64_or(&self, name: &str, default: f64) -> Result<f64, HandlerError> {
        Ok(self.attr_f64(name)?.unwrap_or(default))
    }

    /// Attribute parsed as a signed integer.
    pub fn attr_i32(&self, name: &str) -> Result<Option<i32>, HandlerError> {
        let Some(raw) = self.attr(name) else {
            return Ok(None);
        };
        raw.trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|e| HandlerError::invalid_attribute(name, raw, e.to_string()))
    }

    /// Attribute parsed as a hex color.
    pub fn attr_color(&self, name: &str) -> Result<Option<Rgba>, HandlerError> {
        let Some(raw) = self.attr(name) else {
            return Ok(None);
        };
        Rgba::from_hex(raw)
            .map(Some)
            .map_err(|reason| HandlerError::invalid_attribute(name, raw, reason))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/document/tag.rs"]
mod tests;
