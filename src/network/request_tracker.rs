//! Request generation tracking
//!
//! Refresh cycles are allowed to overlap, so a slow response may arrive after
//! a faster, newer one for the same panel. Every request is stamped with a
//! per-panel generation and only responses newer than the last applied one
//! are accepted.

use crate::events::Panel;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct RequestTracker {
    issued: HashMap<Panel, u64>,
    applied: HashMap<Panel, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new request for `panel`.
    pub fn begin(&mut self, panel: Panel) -> u64 {
        let generation = self.issued.entry(panel).or_insert(0);
        *generation += 1;
        *generation
    }

    /// Whether a response of `generation` may be applied. Accepting it marks it
    /// as the latest applied generation.
    pub fn accept(&mut self, panel: Panel, generation: u64) -> bool {
        let applied = self.applied.entry(panel).or_insert(0);
        if generation <= *applied {
            return false;
        }
        *applied = generation;
        true
    }

    /// Number of requests issued for `panel` so far.
    pub fn issued(&self, panel: Panel) -> u64 {
        self.issued.get(&panel).copied().unwrap_or(0)
    }

    /// Whether a request for `panel` is still outstanding.
    pub fn in_flight(&self, panel: Panel) -> bool {
        self.issued(panel) > self.applied.get(&panel).copied().unwrap_or(0)
    }
}
