//! Failed-attempt tracking and the close-match counting policy.

/// Default number of consecutive failures before a hint is offered.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// Whether a close (but wrong) code consumes a failed attempt.
///
/// The original game deliberately did not count near misses, so players
/// poking around the edge of a code never burned attempts toward a hint.
/// That asymmetry is a pacing decision, so it is a policy here rather than
/// hard-coded behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CloseMatchPolicy {
    /// Close matches are free: no attempt is consumed (reference behavior).
    #[default]
    Lenient,
    /// Close matches count as failures like any other miss.
    Counted,
}

/// What a recorded failure means for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Failure recorded; show the running count.
    Counted {
        /// Failures so far, in `1..max`.
        attempts: u32,
        /// The threshold in effect.
        max: u32,
    },
    /// The threshold was reached: the counter has been reset and the caller
    /// should offer a hint.
    HintDue,
}

/// Counts consecutive failed resolutions.
///
/// The counter lives in `[0, max)`: reaching `max` resets it to zero in the
/// same call that reports [`FailureOutcome::HintDue`].
#[derive(Debug, Clone)]
pub struct AttemptTracker {
    attempts: u32,
    max: u32,
}

impl AttemptTracker {
    /// Tracker with the default threshold of [`MAX_FAILED_ATTEMPTS`].
    pub fn new() -> Self {
        Self::with_max(MAX_FAILED_ATTEMPTS)
    }

    /// Tracker with a custom threshold. A threshold of zero is nonsensical
    /// and clamped to one.
    pub fn with_max(max: u32) -> Self {
        Self {
            attempts: 0,
            max: max.max(1),
        }
    }

    /// Restore a tracker from a persisted count, clamping stale values into
    /// the valid range.
    pub fn from_saved(attempts: u32, max: u32) -> Self {
        let max = max.max(1);
        Self {
            attempts: attempts.min(max - 1),
            max,
        }
    }

    /// Record a failed attempt.
    pub fn on_failure(&mut self) -> FailureOutcome {
        self.attempts += 1;
        if self.attempts >= self.max {
            self.attempts = 0;
            FailureOutcome::HintDue
        } else {
            FailureOutcome::Counted {
                attempts: self.attempts,
                max: self.max,
            }
        }
    }

    /// Record a successful unlock, resetting the counter.
    pub fn on_success(&mut self) {
        self.attempts = 0;
    }

    /// Current count of consecutive failures.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// The threshold in effect.
    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for AttemptTracker {
    fn default() -> Self {
        Self::new()
    }
}
