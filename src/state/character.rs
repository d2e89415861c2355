use crate::state::color::ColorState;
use crate::state::material::MaterialState;
use crate::state::transform::TransformState;

/// Visual subsystem a modifier writes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub enum Subsystem {
    /// [`ColorState`].
    Color,
    /// [`MaterialState`].
    Material,
    /// [`TransformState`].
    Transform,
}

/// All subsystem states of one character slot.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct CharacterState {
    /// Color subsystem.
    pub color: ColorState,
    /// Material subsystem.
    pub material: MaterialState,
    /// Transform subsystem.
    pub transform: TransformState,
}

impl CharacterState {
    /// Reset every subsystem to its default.
    pub fn reset(&mut self) {
        self.color.reset();
        self.material.reset();
        self.transform.reset();
    }

    /// Reset one subsystem.
    pub fn reset_subsystem(&mut self, subsystem: Subsystem) {
        match subsystem {
            Subsystem::Color => self.color.reset(),
            Subsystem::Material => self.material.reset(),
            Subsystem::Transform => self.transform.reset(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/character.rs"]
mod tests;
