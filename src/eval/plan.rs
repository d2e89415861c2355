use rayon::prelude::*;
use smallvec::SmallVec;

use crate::eval::frame::FrameStates;
use crate::modifier::character::ModifyCtx;
use crate::resolve::pass::{Resolution, ResolvedModifier};
use crate::state::character::CharacterState;
use crate::timeline::schedule::TimelineSchedule;

/// Per-character index into the resolved modifier list.
///
/// Built once per [`Resolution`]; owns cheap clones of the modifiers and the schedule so that
/// frames can be evaluated without borrowing the snapshot.
#[derive(Clone, Debug)]
pub struct EvaluationPlan {
    modifiers: Vec<ResolvedModifier>,
    schedule: TimelineSchedule,
    // Modifier indices covering each character, in resolution order.
    per_char: Vec<SmallVec<[u32; 4]>>,
}

impl EvaluationPlan {
    /// Index every modifier of `resolution` by the characters it covers.
    pub fn new(resolution: &Resolution) -> Self {
        let n = resolution.char_count();
        let mut per_char: Vec<SmallVec<[u32; 4]>> = vec![SmallVec::new(); n];
        for (i, m) in resolution.modifiers().iter().enumerate() {
            let idx = u32::try_from(i).unwrap_or(u32::MAX);
            let end = m.range.end.min(n);
            for slot in per_char.iter_mut().take(end).skip(m.range.start) {
                slot.push(idx);
            }
        }
        Self {
            modifiers: resolution.modifiers().to_vec(),
            schedule: resolution.schedule().clone(),
            per_char,
        }
    }

    /// Number of character slots.
    pub fn char_count(&self) -> usize {
        self.per_char.len()
    }

    /// Modifiers covering `index`, in application order.
    pub fn modifiers_for(&self, index: usize) -> impl Iterator<Item = &ResolvedModifier> + '_ {
        self.per_char
            .get(index)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(|&i| self.modifiers.get(i as usize))
    }

    /// Schedule the plan evaluates against.
    pub fn schedule(&self) -> &TimelineSchedule {
        &self.schedule
    }

    /// Evaluate every character at `session_elapsed` into fresh states.
    pub fn evaluate(&self, session_elapsed: f64) -> FrameStates {
        let mut frame = FrameStates::new(self.char_count());
        self.evaluate_into(session_elapsed, &mut frame);
        frame
    }

    /// Evaluate every character at `session_elapsed`, reusing `frame`'s allocations.
    pub fn evaluate_into(&self, session_elapsed: f64, frame: &mut FrameStates) {
        frame.prepare(self.char_count(), session_elapsed);
        let (states, revealed) = frame.slots_mut();
        for (i, (state, shown)) in states.iter_mut().zip(revealed.iter_mut()).enumerate() {
            *shown = self.evaluate_char(i, session_elapsed, state);
        }
    }

    /// Same as [`evaluate_into`](Self::evaluate_into), partitioned by character across the
    /// rayon pool. Each character is evaluated exactly as in the sequential path, so the
    /// result is bit-identical.
    pub fn evaluate_parallel(&self, session_elapsed: f64, frame: &mut FrameStates) {
        frame.prepare(self.char_count(), session_elapsed);
        let (states, revealed) = frame.slots_mut();
        states
            .par_iter_mut()
            .zip(revealed.par_iter_mut())
            .enumerate()
            .for_each(|(i, (state, shown))| {
                *shown = self.evaluate_char(i, session_elapsed, state);
            });
    }

    /// Reset `state` and apply every covering modifier. Returns whether the character is
    /// revealed.
    fn evaluate_char(&self, index: usize, session_elapsed: f64, state: &mut CharacterState) -> bool {
        state.reset();
        let char_elapsed = self
            .schedule
            .char_elapsed(index, session_elapsed)
            .unwrap_or(f64::NEG_INFINITY);
        for m in self.modifiers_for(index) {
            let ctx = ModifyCtx {
                char_index: index,
                session_elapsed,
                char_elapsed,
                range: m.range,
            };
            m.modifier.apply(state, &ctx);
        }
        char_elapsed >= 0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/plan.rs"]
mod tests;
