use crate::core::{AppearedSet, Diagnostic, DisplayItem, LayoutMetrics, SeriesStore, Timeline, Viewport};
use crate::playback::{PlaybackMode, PlaybackState};
use crate::render::Renderer;

use super::{RaceChart, RaceChartConfig};

impl<R: Renderer> RaceChart<R> {
    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.core.model.playback.mode()
    }

    #[must_use]
    pub fn current_frame(&self) -> usize {
        self.core.model.playback.current_frame()
    }

    /// Overall timeline progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.core.model.playback.progress()
    }

    /// Playback time corresponding to the current progress.
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.core
            .model
            .playback
            .elapsed_ms(self.core.model.config.total_playback_duration_ms)
    }

    #[must_use]
    pub fn playback_state(&self) -> &PlaybackState {
        &self.core.model.playback
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        self.core.model.store.timeline()
    }

    #[must_use]
    pub fn store(&self) -> &SeriesStore {
        &self.core.model.store
    }

    #[must_use]
    pub fn config(&self) -> &RaceChartConfig {
        &self.core.model.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.core.model.viewport
    }

    #[must_use]
    pub fn keep_zero_items(&self) -> bool {
        self.core.model.ranking.policy().keep_zero_items
    }

    #[must_use]
    pub fn appeared(&self) -> &AppearedSet {
        self.core.model.ranking.appeared()
    }

    /// Items of the last rendered frame, highest value first.
    #[must_use]
    pub fn visible_items(&self) -> &[DisplayItem] {
        &self.core.presentation.last_items
    }

    #[must_use]
    pub fn layout_metrics(&self) -> Option<LayoutMetrics> {
        self.core.presentation.last_metrics
    }

    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.core.presentation.frames_rendered
    }

    /// Most recent non-fatal diagnostics, oldest first.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.core.runtime.diagnostics.iter()
    }

    #[must_use]
    pub fn diagnostics_recorded(&self) -> u64 {
        self.core.runtime.diagnostics.total_recorded()
    }

    pub fn clear_diagnostics(&mut self) {
        self.core.runtime.diagnostics.clear();
    }

    /// Label of the first timeline entry, for slider chrome.
    #[must_use]
    pub fn start_label(&self) -> &str {
        self.timeline().first_label()
    }

    #[must_use]
    pub fn end_label(&self) -> &str {
        self.timeline().last_label()
    }

    /// Timeline label of the current frame.
    #[must_use]
    pub fn current_label(&self) -> &str {
        self.timeline()
            .label(self.current_frame())
            .unwrap_or_else(|| self.end_label())
    }
}
