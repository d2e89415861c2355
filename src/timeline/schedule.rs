/// Frozen reveal time of every character slot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TimelineSchedule {
    reveal_times: Vec<f64>,
    duration: f64,
}

impl TimelineSchedule {
    pub(crate) fn new(reveal_times: Vec<f64>, paced_end: f64) -> Self {
        let duration = reveal_times.iter().copied().fold(paced_end, f64::max);
        Self {
            reveal_times,
            duration,
        }
    }

    /// Number of scheduled characters.
    pub fn len(&self) -> usize {
        self.reveal_times.len()
    }

    /// True when no character is scheduled.
    pub fn is_empty(&self) -> bool {
        self.reveal_times.is_empty()
    }

    /// Reveal times indexed by character slot.
    pub fn reveal_times(&self) -> &[f64] {
        &self.reveal_times
    }

    /// Session time at which `index` is revealed.
    pub fn reveal_time(&self, index: usize) -> Option<f64> {
        self.reveal_times.get(index).copied()
    }

    /// Seconds since `index` was revealed; negative before its reveal.
    pub fn char_elapsed(&self, index: usize, session_elapsed: f64) -> Option<f64> {
        self.reveal_time(index).map(|t| session_elapsed - t)
    }

    /// True once `index` has been revealed at `session_elapsed`.
    pub fn is_revealed(&self, index: usize, session_elapsed: f64) -> bool {
        self.reveal_time(index)
            .is_some_and(|t| session_elapsed >= t)
    }

    /// Session time by which every character is revealed and every pause has elapsed.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}
