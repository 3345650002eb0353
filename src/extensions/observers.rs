use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::playback::PlaybackMode;

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverContext {
    pub viewport: Viewport,
    pub frame_count: usize,
    pub current_frame: usize,
    pub progress: f64,
    pub mode: PlaybackMode,
    pub keep_zero_items: bool,
}

/// Event stream exposed to hosts driving progress bars and time labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RaceEvent {
    FrameChanged {
        frame_index: usize,
        timeline_label: String,
    },
    PlaybackStateChanged {
        mode: PlaybackMode,
    },
    Progress {
        fraction: f64,
    },
    KeepZeroItemsChanged {
        enabled: bool,
    },
    Resized {
        viewport: Viewport,
    },
    Rendered {
        frame_index: usize,
        visible_items: usize,
    },
}

/// Observer hook interface.
///
/// Observers see events only after the operation that produced them has
/// fully applied, and cannot mutate the chart.
pub trait RaceObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &RaceEvent, context: ObserverContext);
}

/// Adapter turning a closure into an observer.
pub struct FnObserver<F>
where
    F: FnMut(&RaceEvent, ObserverContext),
{
    id: String,
    callback: F,
}

impl<F> FnObserver<F>
where
    F: FnMut(&RaceEvent, ObserverContext),
{
    pub fn new(id: impl Into<String>, callback: F) -> Self {
        Self {
            id: id.into(),
            callback,
        }
    }
}

impl<F> RaceObserver for FnObserver<F>
where
    F: FnMut(&RaceEvent, ObserverContext),
{
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: &RaceEvent, context: ObserverContext) {
        (self.callback)(event, context);
    }
}
