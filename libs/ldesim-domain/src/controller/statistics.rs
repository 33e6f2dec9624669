//! Access statistics for direct fragment reads

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How often, and when, an id was requested directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseStatistics {
    pub count: usize,
    pub at: Vec<DateTime<Utc>>,
}

/// Read attempts keyed by the id exactly as requested
///
/// Misses are recorded as well as hits; redirects are not recorded at all.
#[derive(Debug, Default)]
pub struct StatisticsTable {
    requests: BTreeMap<String, Vec<DateTime<Utc>>>,
}

impl StatisticsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, id: &str, at: DateTime<Utc>) {
        self.requests.entry(id.to_string()).or_default().push(at);
    }

    /// Snapshot of every id requested at least once
    pub fn responses(&self) -> BTreeMap<String, ResponseStatistics> {
        self.requests
            .iter()
            .map(|(id, at)| {
                (
                    id.clone(),
                    ResponseStatistics {
                        count: at.len(),
                        at: at.clone(),
                    },
                )
            })
            .collect()
    }

    /// Forget everything and return how many ids were tracked
    pub fn clear(&mut self) -> usize {
        let count = self.requests.len();
        self.requests.clear();
        count
    }
}
