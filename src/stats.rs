use fitnessfrog_schema::Entry;
use std::collections::HashSet;

/// Aggregates shown above the entries list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivitySummary {
    /// Minutes across entries whose `exclude` flag is off.
    pub total_activity: f64,
    /// Distinct dates with at least one entry, excluded entries included.
    pub active_days: usize,
    /// `None` when there are no active days.
    pub average_daily_activity: Option<f64>,
}

impl ActivitySummary {
    pub fn from_entries(entries: &[Entry]) -> Self {
        let total_activity: f64 = entries
            .iter()
            .filter(|e| !e.exclude)
            .map(|e| e.duration)
            .sum();

        let active_days = entries
            .iter()
            .map(|e| e.date)
            .collect::<HashSet<_>>()
            .len();

        #[allow(clippy::cast_precision_loss)]
        let average_daily_activity =
            (active_days > 0).then(|| total_activity / active_days as f64);

        Self {
            total_activity,
            active_days,
            average_daily_activity,
        }
    }
}
