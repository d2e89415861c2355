//! Reference tag handlers.
//!
//! Every parameter has a default carried by the handler value (set from configuration) that a
//! tag attribute overrides. The `{name=value}` short form fills each handler's primary
//! parameter.

pub(crate) mod composite;
pub(crate) mod modifiers;
pub(crate) mod timeline;

use crate::animation::ease::Ease;
use crate::document::tag::TagNode;
use crate::foundation::error::HandlerError;
use crate::parser::lexer::SHORT_VALUE_KEY;
use crate::registry::handler::{TagHandler, TagHandlerRegistration};

pub use self::composite::Pop;
pub use self::modifiers::{Fade, GroupPivot, Material, Shake, Tint, Wave};
pub use self::timeline::{Delay, Group, Pause, Speed};

/// Every built-in handler under its conventional tag name, with default parameters.
pub fn builtin_registrations() -> Vec<TagHandlerRegistration> {
    vec![
        TagHandlerRegistration::new("tint", TagHandler::modifier(Tint::default())),
        TagHandlerRegistration::new("fade", TagHandler::modifier(Fade::default())),
        TagHandlerRegistration::new("wave", TagHandler::modifier(Wave::default())),
        TagHandlerRegistration::new("shake", TagHandler::modifier(Shake::default())),
        TagHandlerRegistration::new("material", TagHandler::modifier(Material::default())),
        TagHandlerRegistration::new("group_pivot", TagHandler::modifier(GroupPivot)),
        TagHandlerRegistration::new("pop", TagHandler::composite(Pop::default())),
        TagHandlerRegistration::new("delay", TagHandler::timeline(Delay::default())),
        TagHandlerRegistration::new("pause", TagHandler::timeline(Pause::default())),
        TagHandlerRegistration::new("group", TagHandler::timeline(Group)),
        TagHandlerRegistration::new("speed", TagHandler::timeline(Speed::default())),
    ]
}

/// Primary numeric parameter: the named attribute, then the short-form value, then `default`.
pub(crate) fn primary(tag: &TagNode, name: &str, default: f64) -> Result<f64, HandlerError> {
    match tag.attr_f64(name)? {
        Some(v) => Ok(v),
        None => tag.attr_f64_or(SHORT_VALUE_KEY, default),
    }
}

pub(crate) fn non_negative(name: &str, v: f64) -> Result<f64, HandlerError> {
    if v < 0.0 {
        return Err(HandlerError::invalid_attribute(
            name,
            v.to_string(),
            "must not be negative",
        ));
    }
    Ok(v)
}

pub(crate) fn ease(tag: &TagNode, default: Ease) -> Result<Ease, HandlerError> {
    match tag.attr("ease") {
        Some(raw) => Ease::from_name(raw)
            .ok_or_else(|| HandlerError::invalid_attribute("ease", raw, "unknown easing curve")),
        None => Ok(default),
    }
}

/// Normalized progress of a `duration`-long animation started at the character's reveal.
pub(crate) fn reveal_progress(char_elapsed: f64, duration: f64) -> f64 {
    if duration > 0.0 {
        (char_elapsed / duration).clamp(0.0, 1.0)
    } else if char_elapsed >= 0.0 {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/builtin/mod.rs"]
mod tests;
