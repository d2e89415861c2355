use crate::foundation::core::CharRange;
use crate::foundation::error::{HandlerError, TimelineError};
use crate::modifier::provider::TagContext;
use crate::timeline::schedule::TimelineSchedule;

/// Base reveal pacing before any tag reshapes it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RevealPacing {
    /// Seconds between consecutive character reveals.
    pub interval_secs: f64,
    /// Seconds before the first character is revealed.
    pub start_delay_secs: f64,
}

impl Default for RevealPacing {
    fn default() -> Self {
        Self {
            interval_secs: 0.05,
            start_delay_secs: 0.0,
        }
    }
}

impl RevealPacing {
    /// Every character visible at time zero.
    pub const INSTANT: Self = Self {
        interval_secs: 0.0,
        start_delay_secs: 0.0,
    };
}

/// Handler that reshapes the reveal schedule instead of producing modifiers.
pub trait TimelineHandler: Send + Sync {
    /// Record timeline requests for `ctx.tag` on `builder`.
    fn apply(&self, ctx: &TagContext<'_>, builder: &mut TimelineBuilder)
    -> Result<(), HandlerError>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum RevealRule {
    Delay(f64),
    Group,
    At(f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Request {
    Rule { range: CharRange, rule: RevealRule },
    Speed { range: CharRange, factor: f64 },
    Pause { index: usize, secs: f64 },
}

/// Accumulates reveal-timing requests and freezes them into a [`TimelineSchedule`].
///
/// Pacing: character `i` is revealed `interval` seconds after character `i - 1`, starting at
/// `start_delay`. Requests reshape that schedule:
///
/// - [`speed`](Self::speed) replaces the interval of each character in the range;
/// - [`pause`](Self::pause) pushes back every character from an index onward;
/// - [`delay`](Self::delay), [`group`](Self::group) and [`reveal_at`](Self::reveal_at) assign
///   a reveal rule to each character in the range.
///
/// Speeds and rules are per character: when requests overlap, the last request recorded for a
/// character wins. Pauses are the exception: they sit between characters rather than on one,
/// so two pauses at the same index add up. Requests are validated when
/// [`finalize`](Self::finalize) consumes the builder, so nothing can be added afterwards.
#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    char_count: usize,
    pacing: RevealPacing,
    requests: Vec<Request>,
}

impl TimelineBuilder {
    /// Builder over `char_count` slots.
    pub fn new(char_count: usize, pacing: RevealPacing) -> Self {
        Self {
            char_count,
            pacing,
            requests: Vec::new(),
        }
    }

    /// Number of character slots being scheduled.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Base pacing.
    pub fn pacing(&self) -> RevealPacing {
        self.pacing
    }

    /// Reveal the range `secs` later than its paced time.
    pub fn delay(&mut self, range: CharRange, secs: f64) -> &mut Self {
        self.rule(range, RevealRule::Delay(secs))
    }

    /// Reveal the whole range together, at the paced time of its first character.
    pub fn group(&mut self, range: CharRange) -> &mut Self {
        self.rule(range, RevealRule::Group)
    }

    /// Reveal the range at an absolute session time.
    pub fn reveal_at(&mut self, range: CharRange, secs: f64) -> &mut Self {
        self.rule(range, RevealRule::At(secs))
    }

    /// Pace the range `factor` times faster than the base interval.
    pub fn speed(&mut self, range: CharRange, factor: f64) -> &mut Self {
        self.requests.push(Request::Speed { range, factor });
        self
    }

    /// Hold for `secs` before revealing the character at `index`. `index == char_count` is a
    /// trailing pause that only lengthens the schedule.
    pub fn pause(&mut self, index: usize, secs: f64) -> &mut Self {
        self.requests.push(Request::Pause { index, secs });
        self
    }

    fn rule(&mut self, range: CharRange, rule: RevealRule) -> &mut Self {
        self.requests.push(Request::Rule { range, rule });
        self
    }

    pub(crate) fn mark(&self) -> usize {
        self.requests.len()
    }

    /// Drop requests recorded after `mark`.
    pub(crate) fn truncate(&mut self, mark: usize) {
        self.requests.truncate(mark);
    }

    /// Move requests recorded after `tail` so they sit at `mark`, ahead of those recorded in
    /// between. Lets a tag apply after its subtree while keeping document pre-order.
    pub(crate) fn hoist(&mut self, mark: usize, tail: usize) {
        let moved = self.requests.len() - tail;
        self.requests[mark..].rotate_right(moved);
    }

    /// Validate every request and compute the reveal time of each character.
    pub fn finalize(self) -> Result<TimelineSchedule, TimelineError> {
        let n = self.char_count;
        for req in &self.requests {
            self.validate(req)?;
        }
        check_value("interval", self.pacing.interval_secs, false)?;
        check_value("start delay", self.pacing.start_delay_secs, false)?;

        let mut intervals = vec![self.pacing.interval_secs; n];
        let mut pauses = vec![0.0f64; n + 1];
        let mut rules: Vec<Option<(CharRange, RevealRule)>> = vec![None; n];

        for req in &self.requests {
            match *req {
                Request::Speed { range, factor } => {
                    for slot in &mut intervals[range.start..range.end] {
                        *slot = self.pacing.interval_secs / factor;
                    }
                }
                Request::Pause { index, secs } => pauses[index] += secs,
                Request::Rule { range, rule } => {
                    for slot in &mut rules[range.start..range.end] {
                        *slot = Some((range, rule));
                    }
                }
            }
        }

        let mut paced = Vec::with_capacity(n);
        let mut t = self.pacing.start_delay_secs;
        for i in 0..n {
            t += pauses[i];
            paced.push(t);
            t += intervals[i];
        }
        let paced_end = t + pauses[n];

        let reveal_times: Vec<f64> = (0..n)
            .map(|i| match rules[i] {
                None => paced[i],
                Some((_, RevealRule::Delay(d))) => paced[i] + d,
                Some((range, RevealRule::Group)) => paced[range.start],
                Some((_, RevealRule::At(s))) => s,
            })
            .collect();

        tracing::debug!(
            char_count = n,
            requests = self.requests.len(),
            "timeline finalized"
        );
        Ok(TimelineSchedule::new(reveal_times, paced_end))
    }

    fn validate(&self, req: &Request) -> Result<(), TimelineError> {
        let n = self.char_count;
        match *req {
            Request::Rule { range, rule } => {
                check_range(range, n)?;
                match rule {
                    RevealRule::Delay(d) => check_value("delay", d, false),
                    RevealRule::At(s) => check_value("reveal time", s, false),
                    RevealRule::Group => Ok(()),
                }
            }
            Request::Speed { range, factor } => {
                check_range(range, n)?;
                check_value("speed factor", factor, true)
            }
            Request::Pause { index, secs } => {
                if index > n {
                    return Err(TimelineError::PauseOutOfBounds {
                        index,
                        char_count: n,
                    });
                }
                check_value("pause", secs, false)
            }
        }
    }
}

fn check_range(range: CharRange, char_count: usize) -> Result<(), TimelineError> {
    if range.start > range.end {
        Err(TimelineError::InvertedRange { range })
    } else if range.fits(char_count) {
        Ok(())
    } else {
        Err(TimelineError::RangeOutOfBounds { range, char_count })
    }
}

fn check_value(what: &'static str, value: f64, strictly_positive: bool) -> Result<(), TimelineError> {
    let in_range = if strictly_positive {
        value > 0.0
    } else {
        value >= 0.0
    };
    if value.is_finite() && in_range {
        Ok(())
    } else {
        Err(TimelineError::InvalidValue { what, value })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
