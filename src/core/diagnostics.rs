use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub const DIAGNOSTIC_LOG_CAPACITY: usize = 64;

/// Non-fatal conditions recovered from while producing a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// Every visible value was zero; the value axis fell back to `[0, 1]`.
    DegenerateScale,
    /// The text measurer returned a non-finite or negative width.
    MeasurementFallback { text: String },
    /// A scheduled tick arrived after its generation was invalidated.
    StaleTickIgnored { generation: u64 },
}

/// Bounded ring of the most recent diagnostics.
#[derive(Debug, Clone)]
pub struct DiagnosticLog {
    entries: VecDeque<Diagnostic>,
    capacity: usize,
    total_recorded: u64,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::with_capacity(DIAGNOSTIC_LOG_CAPACITY)
    }
}

impl DiagnosticLog {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            total_recorded: 0,
        }
    }

    pub fn record(&mut self, diagnostic: Diagnostic) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(diagnostic);
        self.total_recorded += 1;
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.record(diagnostic);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Count of every diagnostic ever recorded, including evicted ones.
    #[must_use]
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
