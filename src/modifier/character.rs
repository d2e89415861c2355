use std::fmt;
use std::sync::Arc;

use crate::foundation::core::CharRange;
use crate::state::character::{CharacterState, Subsystem};
use crate::state::color::ColorState;
use crate::state::material::MaterialState;
use crate::state::transform::TransformState;

/// Inputs a modifier sees for one character in one evaluation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModifyCtx {
    /// Character slot being evaluated.
    pub char_index: usize,
    /// Seconds since the animated text started playing.
    pub session_elapsed: f64,
    /// Seconds since this character was revealed; negative before its reveal.
    pub char_elapsed: f64,
    /// Slots covered by the tag that produced the modifier.
    pub range: CharRange,
}

impl ModifyCtx {
    /// Position of the character inside the tag's range.
    pub fn index_in_range(&self) -> usize {
        self.char_index.saturating_sub(self.range.start)
    }

    /// True once the character's reveal time has passed.
    pub fn is_revealed(&self) -> bool {
        self.char_elapsed >= 0.0
    }
}

/// Time-parameterized mutation of one subsystem state `S`.
///
/// Implementations must be pure functions of `(state, ctx)` so that re-evaluating the same
/// time produces the same state. Closures `Fn(&mut S, &ModifyCtx)` implement this trait.
pub trait SubsystemModifier<S>: Send + Sync {
    /// Mutate `state` for the character described by `ctx`.
    fn modify(&self, state: &mut S, ctx: &ModifyCtx);
}

impl<S, F> SubsystemModifier<S> for F
where
    F: Fn(&mut S, &ModifyCtx) + Send + Sync,
{
    fn modify(&self, state: &mut S, ctx: &ModifyCtx) {
        self(state, ctx);
    }
}

/// A modifier bound to exactly one subsystem.
///
/// The variant decides which field of [`CharacterState`] the inner modifier receives, so a
/// modifier can never touch another subsystem's state.
#[derive(Clone)]
pub enum CharacterModifier {
    /// Writes [`ColorState`].
    Color(Arc<dyn SubsystemModifier<ColorState>>),
    /// Writes [`MaterialState`].
    Material(Arc<dyn SubsystemModifier<MaterialState>>),
    /// Writes [`TransformState`].
    Transform(Arc<dyn SubsystemModifier<TransformState>>),
}

impl CharacterModifier {
    /// Wrap a color modifier.
    pub fn color(m: impl SubsystemModifier<ColorState> + 'static) -> Self {
        Self::Color(Arc::new(m))
    }

    /// Wrap a material modifier.
    pub fn material(m: impl SubsystemModifier<MaterialState> + 'static) -> Self {
        Self::Material(Arc::new(m))
    }

    /// Wrap a transform modifier.
    pub fn transform(m: impl SubsystemModifier<TransformState> + 'static) -> Self {
        Self::Transform(Arc::new(m))
    }

    /// Subsystem this modifier writes into.
    pub fn subsystem(&self) -> Subsystem {
        match self {
            Self::Color(_) => Subsystem::Color,
            Self::Material(_) => Subsystem::Material,
            Self::Transform(_) => Subsystem::Transform,
        }
    }

    /// Apply to the matching subsystem of `state`.
    pub fn apply(&self, state: &mut CharacterState, ctx: &ModifyCtx) {
        match self {
            Self::Color(m) => m.modify(&mut state.color, ctx),
            Self::Material(m) => m.modify(&mut state.material, ctx),
            Self::Transform(m) => m.modify(&mut state.transform, ctx),
        }
    }
}

impl fmt::Debug for CharacterModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CharacterModifier")
            .field(&self.subsystem())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/modifier/character.rs"]
mod tests;
