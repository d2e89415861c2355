use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::builtin::composite::Pop;
use crate::builtin::modifiers::{Fade, GroupPivot, Material, Shake, Tint, Wave};
use crate::builtin::timeline::{Delay, Group, Pause, Speed};
use crate::foundation::error::{GlyphFxError, GlyphFxResult};
use crate::registry::handler::{TagHandler, TagHandlerRegistration, TagHandlerRegistry};
use crate::resolve::options::{HandlerErrorPolicy, ResolveOptions, UnknownTagPolicy};
use crate::timeline::builder::RevealPacing;

/// One configuration load: pacing, policies, and the tag vocabulary.
///
/// ```json
/// {
///   "pacing": { "interval_secs": 0.04 },
///   "on_handler_error": "skip_subtree",
///   "tags": [
///     { "id": "red", "handler": { "kind": "tint", "color": "#ff0000" } },
///     { "id": "slow", "handler": { "kind": "speed", "factor": 0.5 } }
///   ]
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GlyphFxConfig {
    /// Base reveal pacing.
    #[serde(default)]
    pub pacing: RevealPacing,
    /// Handler failure policy.
    #[serde(default)]
    pub on_handler_error: HandlerErrorPolicy,
    /// Unknown tag policy.
    #[serde(default)]
    pub unknown_tags: UnknownTagPolicy,
    /// Tag registrations in order; later entries override earlier ones.
    #[serde(default)]
    pub tags: Vec<TagDef>,
}

/// A tag identifier bound to a built-in handler.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TagDef {
    /// Tag identifier, matched case-insensitively.
    pub id: String,
    /// Handler; entries without one are dropped when the registry is built.
    #[serde(default)]
    pub handler: Option<HandlerDef>,
}

/// Built-in handler with its default parameters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandlerDef {
    /// [`Tint`] color override.
    Tint(Tint),
    /// [`Fade`] alpha ramp.
    Fade(Fade),
    /// [`Wave`] sine offset.
    Wave(Wave),
    /// [`Shake`] jitter.
    Shake(Shake),
    /// [`Material`] property override.
    Material(Material),
    /// [`GroupPivot`] shared pivot.
    GroupPivot,
    /// [`Pop`] scale and fade.
    Pop(Pop),
    /// [`Delay`] timeline shift.
    Delay(Delay),
    /// [`Pause`] timeline hold.
    Pause(Pause),
    /// [`Group`] simultaneous reveal.
    Group,
    /// [`Speed`] pacing factor.
    Speed(Speed),
}

impl HandlerDef {
    /// Handler value registered for this definition.
    pub fn to_handler(&self) -> TagHandler {
        match *self {
            Self::Tint(h) => TagHandler::modifier(h),
            Self::Fade(h) => TagHandler::modifier(h),
            Self::Wave(h) => TagHandler::modifier(h),
            Self::Shake(h) => TagHandler::modifier(h),
            Self::Material(h) => TagHandler::modifier(h),
            Self::GroupPivot => TagHandler::modifier(GroupPivot),
            Self::Pop(h) => TagHandler::composite(h),
            Self::Delay(h) => TagHandler::timeline(h),
            Self::Pause(h) => TagHandler::timeline(h),
            Self::Group => TagHandler::timeline(Group),
            Self::Speed(h) => TagHandler::timeline(h),
        }
    }

    fn validate(&self, path: &str) -> GlyphFxResult<()> {
        match self {
            Self::Fade(h) => non_negative(path, "duration_secs", h.duration_secs),
            Self::Wave(h) => positive(path, "wavelength_chars", h.wavelength_chars),
            Self::Shake(h) => non_negative(path, "rate_hz", h.rate_hz),
            Self::Pop(h) => non_negative(path, "duration_secs", h.duration_secs),
            Self::Delay(h) => non_negative(path, "secs", h.secs),
            Self::Pause(h) => non_negative(path, "secs", h.secs),
            Self::Speed(h) => positive(path, "factor", h.factor),
            Self::Tint(_) | Self::Material(_) | Self::GroupPivot | Self::Group => Ok(()),
        }
    }
}

impl GlyphFxConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> GlyphFxResult<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| GlyphFxError::serde(format!("parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GlyphFxResult<Self> {
        let config: Self = serde_json::from_reader(r)
            .map_err(|e| GlyphFxError::serde(format!("parse config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GlyphFxResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GlyphFxError::config(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> GlyphFxResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| GlyphFxError::serde(e.to_string()))
    }

    /// Reject negative or non-finite pacing and out-of-range handler defaults.
    pub fn validate(&self) -> GlyphFxResult<()> {
        non_negative("$.pacing", "interval_secs", self.pacing.interval_secs)?;
        non_negative("$.pacing", "start_delay_secs", self.pacing.start_delay_secs)?;
        for (i, tag) in self.tags.iter().enumerate() {
            if let Some(handler) = &tag.handler {
                handler.validate(&format!("$.tags[{i}].handler"))?;
            }
        }
        Ok(())
    }

    /// Registrations in declaration order. Blank ids and missing handlers are passed through
    /// so that [`TagHandlerRegistry::build`] applies its drop policy.
    pub fn registrations(&self) -> Vec<TagHandlerRegistration> {
        self.tags
            .iter()
            .map(|t| TagHandlerRegistration {
                identifier: t.id.clone(),
                handler: t.handler.as_ref().map(HandlerDef::to_handler),
            })
            .collect()
    }

    /// Registry built from [`registrations`](Self::registrations).
    pub fn registry(&self) -> TagHandlerRegistry {
        TagHandlerRegistry::build(self.registrations())
    }

    /// Options for [`resolve`](crate::resolve).
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            pacing: self.pacing,
            on_handler_error: self.on_handler_error,
            unknown_tags: self.unknown_tags,
        }
    }
}

fn non_negative(path: &str, field: &str, v: f64) -> GlyphFxResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(GlyphFxError::config(format!(
            "{path}.{field}: must be finite and non-negative, got {v}"
        )))
    }
}

fn positive(path: &str, field: &str, v: f64) -> GlyphFxResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(GlyphFxError::config(format!(
            "{path}.{field}: must be finite and positive, got {v}"
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
