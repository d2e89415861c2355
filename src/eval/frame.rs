use crate::eval::fingerprint::{FrameFingerprint, fingerprint_frame};
use crate::foundation::core::{Affine, Point, Vec2};
use crate::state::character::CharacterState;

/// Evaluated subsystem states of every character for one session time.
///
/// Handed to the renderer read-only; reuse one value across frames with
/// [`EvaluationPlan::evaluate_into`](crate::EvaluationPlan::evaluate_into).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct FrameStates {
    session_elapsed: f64,
    states: Vec<CharacterState>,
    revealed: Vec<bool>,
}

impl FrameStates {
    /// Default states for `char_count` characters.
    pub fn new(char_count: usize) -> Self {
        Self {
            session_elapsed: 0.0,
            states: vec![CharacterState::default(); char_count],
            revealed: vec![false; char_count],
        }
    }

    pub(crate) fn prepare(&mut self, char_count: usize, session_elapsed: f64) {
        self.session_elapsed = session_elapsed;
        self.states.resize_with(char_count, CharacterState::default);
        self.revealed.resize(char_count, false);
    }

    pub(crate) fn slots_mut(&mut self) -> (&mut [CharacterState], &mut [bool]) {
        (&mut self.states, &mut self.revealed)
    }

    /// Session time these states were evaluated at.
    pub fn session_elapsed(&self) -> f64 {
        self.session_elapsed
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// True when there are no characters.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// States indexed by character slot.
    pub fn states(&self) -> &[CharacterState] {
        &self.states
    }

    /// State of one character.
    pub fn state(&self, index: usize) -> Option<&CharacterState> {
        self.states.get(index)
    }

    /// Whether the character's reveal time has passed.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Pivot a character rotates and scales around.
    ///
    /// `glyph_centers` holds the laid-out center of every character slot. Ungrouped characters
    /// pivot on their own center; grouped characters share the mean center of their group.
    pub fn pivot_for(&self, index: usize, glyph_centers: &[Point]) -> Option<Point> {
        let state = self.states.get(index)?;
        let Some(group) = state.transform.group else {
            return glyph_centers.get(index).copied();
        };
        let last = group.last.min(glyph_centers.len().checked_sub(1)?);
        let members = glyph_centers.get(group.first..=last)?;
        if members.is_empty() {
            return glyph_centers.get(index).copied();
        }
        let sum = members.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        Some((sum / members.len() as f64).to_point())
    }

    /// Glyph transform of one character, pivoting per [`pivot_for`](Self::pivot_for).
    pub fn affine_for(&self, index: usize, glyph_centers: &[Point]) -> Option<Affine> {
        let pivot = self.pivot_for(index, glyph_centers)?;
        Some(self.states.get(index)?.transform.to_affine(pivot))
    }

    /// Stable 128-bit digest of every state and reveal flag.
    pub fn fingerprint(&self) -> FrameFingerprint {
        fingerprint_frame(&self.states, &self.revealed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/frame.rs"]
mod tests;
