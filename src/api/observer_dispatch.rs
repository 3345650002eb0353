use crate::extensions::{ObserverContext, RaceEvent};
use crate::render::Renderer;

use super::RaceChart;

impl<R: Renderer> RaceChart<R> {
    pub(super) fn observer_context(&self) -> ObserverContext {
        let model = &self.core.model;
        ObserverContext {
            viewport: model.viewport,
            frame_count: model.frame_count(),
            current_frame: model.playback.current_frame(),
            progress: model.playback.progress(),
            mode: model.playback.mode(),
            keep_zero_items: model.ranking.policy().keep_zero_items,
        }
    }

    pub(super) fn queue_event(&mut self, event: RaceEvent) {
        self.core.runtime.pending_events.push_back(event);
    }

    /// Delivers queued events in order, all against the post-operation
    /// context.
    pub(super) fn flush_events(&mut self) {
        if self.core.runtime.pending_events.is_empty() {
            return;
        }
        let context = self.observer_context();
        let runtime = &mut self.core.runtime;
        while let Some(event) = runtime.pending_events.pop_front() {
            for observer in &mut runtime.observers {
                observer.on_event(&event, context);
            }
        }
    }
}
