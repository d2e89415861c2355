use std::f64::consts::TAU;

use crate::animation::ease::Ease;
use crate::builtin::{ease, non_negative, primary, reveal_progress};
use crate::foundation::core::{Rgba, Vec2};
use crate::foundation::error::HandlerError;
use crate::foundation::hash::{mix64, stable_hash64, unit_signed};
use crate::modifier::character::{CharacterModifier, ModifyCtx};
use crate::modifier::provider::{ModifierProvider, TagContext};
use crate::parser::lexer::SHORT_VALUE_KEY;
use crate::state::color::ColorState;
use crate::state::material::MaterialState;
use crate::state::transform::{PivotGroup, TransformState};

/// `{tint color=#RRGGBB[AA]}`: override the RGB and set the color layer's alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Tint {
    /// Color used when the tag names none.
    #[serde(with = "crate::foundation::core::hex_color")]
    pub color: Option<Rgba>,
}

impl ModifierProvider for Tint {
    fn create_modifier(
        &self,
        ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        let named = match ctx.tag.attr_color("color")? {
            Some(color) => Some(color),
            None => ctx.tag.attr_color(SHORT_VALUE_KEY)?,
        };
        let color = named
            .or(self.color)
            .ok_or_else(|| HandlerError::MissingAttribute("color".to_owned()))?;
        Ok(Some(CharacterModifier::color(
            move |state: &mut ColorState, _: &ModifyCtx| {
                state.set_rgb(color);
                state.set_alpha(color.a);
            },
        )))
    }
}

/// `{fade duration=0.3 ease=out_quad}`: ramp the color alpha from 0 to 1 after each
/// character's reveal.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Fade {
    /// Ramp length in seconds.
    pub duration_secs: f64,
    /// Ramp curve.
    pub ease: Ease,
}

impl Default for Fade {
    fn default() -> Self {
        Self {
            duration_secs: 0.3,
            ease: Ease::OutQuad,
        }
    }
}

impl ModifierProvider for Fade {
    fn create_modifier(
        &self,
        ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        let duration = primary(ctx.tag, "duration", self.duration_secs)?;
        let duration = non_negative("duration", duration)?;
        let curve = ease(ctx.tag, self.ease)?;
        Ok(Some(CharacterModifier::color(
            move |state: &mut ColorState, c: &ModifyCtx| {
                state.set_alpha(curve.apply(reveal_progress(c.char_elapsed, duration)));
            },
        )))
    }
}

/// `{wave amp=4 freq=1 wavelength=8}`: vertical sine offset travelling along the range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Wave {
    /// Peak offset.
    pub amplitude: f64,
    /// Oscillations per second.
    pub frequency_hz: f64,
    /// Characters per full period along the text.
    pub wavelength_chars: f64,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            amplitude: 4.0,
            frequency_hz: 1.0,
            wavelength_chars: 8.0,
        }
    }
}

impl ModifierProvider for Wave {
    fn create_modifier(
        &self,
        ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        let amp = primary(ctx.tag, "amp", self.amplitude)?;
        let freq = ctx.tag.attr_f64_or("freq", self.frequency_hz)?;
        let wavelength = ctx.tag.attr_f64_or("wavelength", self.wavelength_chars)?;
        if wavelength <= 0.0 {
            return Err(HandlerError::invalid_attribute(
                "wavelength",
                wavelength.to_string(),
                "must be positive",
            ));
        }
        Ok(Some(CharacterModifier::transform(
            move |state: &mut TransformState, c: &ModifyCtx| {
                let phase = c.index_in_range() as f64 / wavelength;
                state.position.y += amp * (TAU * (freq * c.session_elapsed + phase)).sin();
            },
        )))
    }
}

/// `{shake amp=1.5 rate=12 seed=anything}`: smooth pseudo-random jitter, reproducible for a
/// given seed, character and time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Shake {
    /// Peak offset on each axis.
    pub amplitude: f64,
    /// New jitter targets per second.
    pub rate_hz: f64,
    /// Base seed mixed with the tag's `seed` attribute.
    pub seed: u64,
}

impl Default for Shake {
    fn default() -> Self {
        Self {
            amplitude: 1.5,
            rate_hz: 12.0,
            seed: 0,
        }
    }
}

impl ModifierProvider for Shake {
    fn create_modifier(
        &self,
        ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        let amp = primary(ctx.tag, "amp", self.amplitude)?;
        let rate = non_negative("rate", ctx.tag.attr_f64_or("rate", self.rate_hz)?)?;
        let seed = stable_hash64(self.seed, ctx.tag.attr("seed").unwrap_or_default());
        Ok(Some(CharacterModifier::transform(
            move |state: &mut TransformState, c: &ModifyCtx| {
                let key = mix64(seed ^ c.char_index as u64);
                let x = c.session_elapsed * rate;
                state.position += Vec2::new(
                    amp * noise(key, x),
                    amp * noise(key ^ 0x5bd1_e995, x),
                );
            },
        )))
    }
}

/// Value noise in `[-1, 1]`, linear between integer lattice points.
fn noise(key: u64, x: f64) -> f64 {
    let i0 = x.floor();
    let t = x - i0;
    let i = i0.max(0.0) as u64;
    let a = unit_signed(mix64(key ^ i.wrapping_mul(0xD6E8_FEB8_6659_FD93)));
    let b = unit_signed(mix64(key ^ (i + 1).wrapping_mul(0xD6E8_FEB8_6659_FD93)));
    a + (b - a) * t
}

/// `{material property=3 value=0.5}`: override one shader property.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Material {
    /// Property id used when the tag names none.
    pub property: Option<i32>,
    /// Value used when the tag gives none.
    pub value: f64,
}

impl ModifierProvider for Material {
    fn create_modifier(
        &self,
        ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        let property = ctx
            .tag
            .attr_i32("property")?
            .or(self.property)
            .ok_or_else(|| HandlerError::MissingAttribute("property".to_owned()))?;
        let value = ctx.tag.attr_f64_or("value", self.value)?;
        Ok(Some(CharacterModifier::material(
            move |state: &mut MaterialState, _: &ModifyCtx| state.set(property, value),
        )))
    }
}

/// `{group_pivot}`: rotate and scale the range around one shared pivot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupPivot;

impl ModifierProvider for GroupPivot {
    fn create_modifier(
        &self,
        ctx: &TagContext<'_>,
    ) -> Result<Option<CharacterModifier>, HandlerError> {
        if ctx.range.is_empty() {
            return Ok(None);
        }
        let group = PivotGroup {
            first: ctx.range.start,
            last: ctx.range.end - 1,
        };
        Ok(Some(CharacterModifier::transform(
            move |state: &mut TransformState, _: &ModifyCtx| state.group = Some(group),
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/builtin/modifiers.rs"]
mod tests;
