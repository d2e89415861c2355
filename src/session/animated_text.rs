use crate::config::model::GlyphFxConfig;
use crate::document::node::Document;
use crate::eval::frame::FrameStates;
use crate::eval::plan::EvaluationPlan;
use crate::foundation::error::GlyphFxResult;
use crate::parser::TagParser;
use crate::parser::curly::CurlyParser;
use crate::registry::handler::TagHandlerRegistry;
use crate::resolve::options::ResolveOptions;
use crate::resolve::output::OutputText;
use crate::resolve::pass::{Resolution, resolve};
use crate::timeline::schedule::TimelineSchedule;

/// Parsed and resolved snapshot of one text version.
///
/// Construction front-loads parsing and resolution; evaluation is then a pure function of the
/// session time. Changing the text means building a new snapshot.
#[derive(Clone, Debug)]
pub struct AnimatedText {
    markup: String,
    document: Document,
    resolution: Resolution,
    plan: EvaluationPlan,
}

impl AnimatedText {
    /// Parse `markup` with `parser` and resolve it against `registry`.
    #[tracing::instrument(skip_all, fields(len = markup.len()))]
    pub fn new<P>(
        parser: &P,
        registry: &TagHandlerRegistry,
        options: &ResolveOptions,
        markup: &str,
    ) -> GlyphFxResult<Self>
    where
        P: TagParser + ?Sized,
    {
        let document = parser.parse(markup)?;
        let resolution = resolve(&document, registry, options)?;
        let plan = EvaluationPlan::new(&resolution);
        tracing::debug!(
            chars = resolution.char_count(),
            modifiers = resolution.modifiers().len(),
            duration = resolution.schedule().duration(),
            "animated text ready"
        );
        Ok(Self {
            markup: markup.to_owned(),
            document,
            resolution,
            plan,
        })
    }

    /// Parse curly-brace `markup` with the vocabulary and policies of `config`.
    pub fn from_config(config: &GlyphFxConfig, markup: &str) -> GlyphFxResult<Self> {
        Self::new(
            &CurlyParser,
            &config.registry(),
            &config.resolve_options(),
            markup,
        )
    }

    /// Source markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Parsed document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Resolution output.
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    /// Output text and slot mapping.
    pub fn output(&self) -> &OutputText {
        self.resolution.output()
    }

    /// Reveal schedule.
    pub fn schedule(&self) -> &TimelineSchedule {
        self.resolution.schedule()
    }

    /// Number of character slots.
    pub fn char_count(&self) -> usize {
        self.resolution.char_count()
    }

    /// Session time by which every character is revealed.
    pub fn duration(&self) -> f64 {
        self.schedule().duration()
    }

    /// True once playback has passed the end of the schedule.
    pub fn is_complete(&self, session_elapsed: f64) -> bool {
        session_elapsed >= self.duration()
    }

    /// Number of characters revealed at `session_elapsed`.
    pub fn revealed_count(&self, session_elapsed: f64) -> usize {
        (0..self.char_count())
            .filter(|&i| self.schedule().is_revealed(i, session_elapsed))
            .count()
    }

    /// Evaluate every character at `session_elapsed`.
    pub fn evaluate(&self, session_elapsed: f64) -> FrameStates {
        self.plan.evaluate(session_elapsed)
    }

    /// Evaluate into a reused frame.
    pub fn evaluate_into(&self, session_elapsed: f64, frame: &mut FrameStates) {
        self.plan.evaluate_into(session_elapsed, frame);
    }

    /// Evaluate into a reused frame, partitioning characters across the rayon pool.
    pub fn evaluate_parallel(&self, session_elapsed: f64, frame: &mut FrameStates) {
        self.plan.evaluate_parallel(session_elapsed, frame);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/animated_text.rs"]
mod tests;
