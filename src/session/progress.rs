//! Progress reporting and achievement evaluation.

use std::collections::HashSet;

use crate::engine::catalog::AchievementDef;

/// Unlock progress for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressReport {
    /// Codes unlocked so far.
    pub unlocked: usize,
    /// Total codes in the catalog.
    pub total: usize,
}

impl ProgressReport {
    /// Progress as a whole percentage; zero for an empty catalog.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.unlocked as f64 / self.total as f64) * 100.0).round() as u32
        }
    }
}

/// Definitions newly satisfied by the current unlock count, in authored
/// order. Already-earned ids are skipped; awards are monotonic and the
/// caller persists each one.
pub fn newly_earned<'a>(
    defs: &'a [AchievementDef],
    unlocked_count: usize,
    earned: &HashSet<String>,
) -> Vec<&'a AchievementDef> {
    defs.iter()
        .filter(|def| unlocked_count >= def.required)
        .filter(|def| !earned.contains(&def.id))
        .collect()
}
