use std::collections::VecDeque;

use crate::core::DiagnosticLog;
use crate::extensions::{RaceEvent, RaceObserver};
use crate::playback::{Clock, Scheduler};

/// Runtime orchestration state: timers, observers and diagnostics.
pub(super) struct ChartRuntimeState {
    pub(super) scheduler: Box<dyn Scheduler>,
    pub(super) clock: Box<dyn Clock>,
    pub(super) observers: Vec<Box<dyn RaceObserver>>,
    pub(super) pending_events: VecDeque<RaceEvent>,
    pub(super) diagnostics: DiagnosticLog,
}

impl ChartRuntimeState {
    #[must_use]
    pub(super) fn new(scheduler: Box<dyn Scheduler>, clock: Box<dyn Clock>) -> Self {
        Self {
            scheduler,
            clock,
            observers: Vec::new(),
            pending_events: VecDeque::new(),
            diagnostics: DiagnosticLog::default(),
        }
    }
}
