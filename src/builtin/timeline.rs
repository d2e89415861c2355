use crate::builtin::{non_negative, primary};
use crate::foundation::error::HandlerError;
use crate::modifier::provider::TagContext;
use crate::timeline::builder::{TimelineBuilder, TimelineHandler};

/// `{delay=0.5}`: reveal the wrapped text later than its paced time.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Delay {
    /// Default delay in seconds.
    pub secs: f64,
}

impl TimelineHandler for Delay {
    fn apply(
        &self,
        ctx: &TagContext<'_>,
        builder: &mut TimelineBuilder,
    ) -> Result<(), HandlerError> {
        let secs = non_negative("secs", primary(ctx.tag, "secs", self.secs)?)?;
        builder.delay(ctx.range, secs);
        Ok(())
    }
}

/// `{pause=0.5/}`: hold the reveal before the next character.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Pause {
    /// Default hold in seconds.
    pub secs: f64,
}

impl Default for Pause {
    fn default() -> Self {
        Self { secs: 0.5 }
    }
}

impl TimelineHandler for Pause {
    fn apply(
        &self,
        ctx: &TagContext<'_>,
        builder: &mut TimelineBuilder,
    ) -> Result<(), HandlerError> {
        let secs = non_negative("secs", primary(ctx.tag, "secs", self.secs)?)?;
        builder.pause(ctx.range.start, secs);
        Ok(())
    }
}

/// `{group}`: reveal the wrapped text all at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Group;

impl TimelineHandler for Group {
    fn apply(
        &self,
        ctx: &TagContext<'_>,
        builder: &mut TimelineBuilder,
    ) -> Result<(), HandlerError> {
        builder.group(ctx.range);
        Ok(())
    }
}

/// `{speed=2}`: reveal the wrapped text `factor` times faster.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Speed {
    /// Default speed factor.
    pub factor: f64,
}

impl Default for Speed {
    fn default() -> Self {
        Self { factor: 1.0 }
    }
}

impl TimelineHandler for Speed {
    fn apply(
        &self,
        ctx: &TagContext<'_>,
        builder: &mut TimelineBuilder,
    ) -> Result<(), HandlerError> {
        let factor = primary(ctx.tag, "factor", self.factor)?;
        if factor <= 0.0 {
            return Err(HandlerError::invalid_attribute(
                "factor",
                factor.to_string(),
                "must be positive",
            ));
        }
        builder.speed(ctx.range, factor);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/builtin/timeline.rs"]
mod tests;
