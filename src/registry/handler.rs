use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::modifier::provider::{CompositeProvider, ModifierProvider};
use crate::timeline::builder::TimelineHandler;

/// Capability a tag identifier resolves to.
#[derive(Clone)]
pub enum TagHandler {
    /// Produces at most one modifier.
    Modifier(Arc<dyn ModifierProvider>),
    /// Produces an ordered sequence of modifiers.
    Composite(Arc<dyn CompositeProvider>),
    /// Reshapes the reveal timeline.
    Timeline(Arc<dyn TimelineHandler>),
}

impl TagHandler {
    /// Wrap a single-modifier provider.
    pub fn modifier(p: impl ModifierProvider + 'static) -> Self {
        Self::Modifier(Arc::new(p))
    }

    /// Wrap a composite provider.
    pub fn composite(p: impl CompositeProvider + 'static) -> Self {
        Self::Composite(Arc::new(p))
    }

    /// Wrap a timeline handler.
    pub fn timeline(h: impl TimelineHandler + 'static) -> Self {
        Self::Timeline(Arc::new(h))
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Self::Modifier(_) => "modifier",
            Self::Composite(_) => "composite",
            Self::Timeline(_) => "timeline",
        }
    }
}

impl fmt::Debug for TagHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TagHandler").field(&self.kind_name()).finish()
    }
}

/// One `(identifier, handler)` entry from host configuration.
#[derive(Clone, Debug)]
pub struct TagHandlerRegistration {
    /// Tag identifier, matched case-insensitively.
    pub identifier: String,
    /// Handler; `None` marks a malformed entry.
    pub handler: Option<TagHandler>,
}

impl TagHandlerRegistration {
    /// Registration for `identifier`.
    pub fn new(identifier: impl Into<String>, handler: TagHandler) -> Self {
        Self {
            identifier: identifier.into(),
            handler: Some(handler),
        }
    }
}

/// Immutable, case-insensitive map from tag identifier to handler.
#[derive(Clone, Debug, Default)]
pub struct TagHandlerRegistry {
    handlers: HashMap<String, TagHandler>,
}

impl TagHandlerRegistry {
    /// Build from registrations in order.
    ///
    /// Entries with a blank identifier or no handler are dropped. When two entries share an
    /// identifier (ignoring case), the later one wins. Never fails.
    pub fn build(registrations: impl IntoIterator<Item = TagHandlerRegistration>) -> Self {
        let mut handlers = HashMap::new();
        for reg in registrations {
            let Some(handler) = reg.handler else {
                tracing::debug!(identifier = %reg.identifier, "dropping registration without handler");
                continue;
            };
            if reg.identifier.trim().is_empty() {
                tracing::debug!("dropping registration with blank identifier");
                continue;
            }
            let key = normalize_identifier(&reg.identifier);
            if handlers.insert(key, handler).is_some() {
                tracing::debug!(identifier = %reg.identifier, "registration overrides an earlier one");
            }
        }
        Self { handlers }
    }

    /// Handler for `identifier`, ignoring case. Unknown identifiers yield `None`.
    pub fn resolve(&self, identifier: &str) -> Option<&TagHandler> {
        self.handlers.get(&normalize_identifier(identifier))
    }

    /// Number of registered identifiers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

fn normalize_identifier(identifier: &str) -> String {
    identifier.trim().to_lowercase()
}

#[cfg(test)]
#[path = "../../tests/unit/registry/handler.rs"]
mod tests;
