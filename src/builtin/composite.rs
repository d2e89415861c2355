use crate::animation::ease::Ease;
use crate::builtin::{non_negative, primary, reveal_progress};
use crate::foundation::core::Vec2;
use crate::foundation::error::HandlerError;
use crate::modifier::character::{CharacterModifier, ModifyCtx};
use crate::modifier::provider::{CompositeProvider, ModifierIter, TagContext};
use crate::state::color::ColorState;
use crate::state::transform::TransformState;

/// `{pop duration=0.25 from=0.5}`: each character scales up from `from` with an overshoot
/// while its alpha fades in. Expands to a transform modifier followed by a color modifier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Pop {
    /// Length of the pop in seconds.
    pub duration_secs: f64,
    /// Starting scale.
    pub from_scale: f64,
}

impl Default for Pop {
    fn default() -> Self {
        Self {
            duration_secs: 0.25,
            from_scale: 0.5,
        }
    }
}

impl Pop {
    fn params(&self, ctx: &TagContext<'_>) -> Result<(f64, f64), HandlerError> {
        let duration = primary(ctx.tag, "duration", self.duration_secs)?;
        let duration = non_negative("duration", duration)?;
        let from = ctx.tag.attr_f64_or("from", self.from_scale)?;
        Ok((duration, from))
    }
}

impl CompositeProvider for Pop {
    fn create_modifiers<'a>(&'a self, ctx: TagContext<'a>) -> ModifierIter<'a> {
        let (duration, from) = match self.params(&ctx) {
            Ok(p) => p,
            Err(e) => return Box::new(std::iter::once(Err(e))),
        };
        let scale = CharacterModifier::transform(move |state: &mut TransformState, c: &ModifyCtx| {
            let k = Ease::OutBack.apply(reveal_progress(c.char_elapsed, duration));
            let s = from + (1.0 - from) * k;
            state.scale = Vec2::new(state.scale.x * s, state.scale.y * s);
        });
        let fade = CharacterModifier::color(move |state: &mut ColorState, c: &ModifyCtx| {
            state.set_alpha(Ease::OutQuad.apply(reveal_progress(c.char_elapsed, duration)));
        });
        Box::new([Ok(scale), Ok(fade)].into_iter())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/builtin/composite.rs"]
mod tests;
