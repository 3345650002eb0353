use serde::{Deserialize, Serialize};

use crate::core::{DisplayItem, LayoutMetrics, Viewport};
use crate::playback::PlaybackMode;
use crate::render::Renderer;

use super::RaceChart;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub viewport: Viewport,
    pub mode: PlaybackMode,
    pub frame_count: usize,
    pub current_frame: usize,
    pub current_label: String,
    pub progress: f64,
    pub keep_zero_items: bool,
    pub visible_items: Vec<DisplayItem>,
    pub appeared: Vec<String>,
    pub layout: Option<LayoutMetrics>,
    pub diagnostics_recorded: u64,
}

impl<R: Renderer> RaceChart<R> {
    #[must_use]
    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            viewport: self.viewport(),
            mode: self.mode(),
            frame_count: self.timeline().len(),
            current_frame: self.current_frame(),
            current_label: self.current_label().to_owned(),
            progress: self.progress(),
            keep_zero_items: self.keep_zero_items(),
            visible_items: self.visible_items().to_vec(),
            appeared: self.appeared().iter().map(str::to_owned).collect(),
            layout: self.layout_metrics(),
            diagnostics_recorded: self.diagnostics_recorded(),
        }
    }
}
