//! Window label filtering applied before windowed charts are emitted.

use crate::aggregator::WindowSeries;
use log::debug;
use std::collections::HashSet;

/// Set of window labels to hide
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowFilter {
    excluded: HashSet<String>,
}

impl WindowFilter {
    pub fn excluding<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded: labels
                .into_iter()
                .map(|l| l.as_ref().trim().to_string())
                .collect(),
        }
    }

    pub fn allows(&self, label: &str) -> bool {
        !self.excluded.contains(label.trim())
    }

    /// Drop excluded windows, keeping the order of the rest
    pub fn apply(&self, series: Vec<WindowSeries>) -> Vec<WindowSeries> {
        let before = series.len();
        let kept: Vec<WindowSeries> = series
            .into_iter()
            .filter(|s| self.allows(&s.window))
            .collect();

        if kept.len() != before {
            debug!("Window filter removed {} series", before - kept.len());
        }

        kept
    }
}
