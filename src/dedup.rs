use std::collections::HashSet;

use chrono::NaiveDate;

/// Tracks calendar dates already emitted during a single extraction run.
///
/// Used by sources that expose the same occurrence through two document
/// sections; date granularity is deliberate since the sections disagree on
/// the exact time. Never shared across sources or runs.
#[derive(Debug, Default)]
pub struct SeenDates {
    dates: HashSet<NaiveDate>,
}

impl SeenDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a date; returns false if it was already present.
    pub fn mark(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}
