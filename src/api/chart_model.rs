use crate::core::{FrameValues, RankingEngine, SeriesStore, Viewport};
use crate::playback::PlaybackState;

use super::RaceChartConfig;

/// The instant last handed to the ranking stage.
///
/// Re-renders triggered by resize or keep-zero toggles redraw exactly this
/// instant, so the display never jumps to a different point in time.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct DisplayedInstant {
    pub(super) frame_index: usize,
    pub(super) sub_progress: f64,
    pub(super) progress: f64,
    pub(super) values: FrameValues,
}

/// Chart domain state: data, configuration, ranking and playback.
pub(super) struct ChartModel {
    pub(super) store: SeriesStore,
    pub(super) config: RaceChartConfig,
    pub(super) viewport: Viewport,
    pub(super) ranking: RankingEngine,
    pub(super) playback: PlaybackState,
    pub(super) displayed: DisplayedInstant,
}

impl ChartModel {
    #[must_use]
    pub(super) fn new(store: SeriesStore, config: RaceChartConfig, ranking: RankingEngine) -> Self {
        let displayed = DisplayedInstant {
            frame_index: 0,
            sub_progress: 0.0,
            progress: 0.0,
            values: store.frame_values(0),
        };
        Self {
            viewport: config.viewport,
            store,
            config,
            ranking,
            playback: PlaybackState::default(),
            displayed,
        }
    }

    #[must_use]
    pub(super) fn frame_count(&self) -> usize {
        self.store.frame_count()
    }

    #[must_use]
    pub(super) fn last_frame_index(&self) -> usize {
        self.store.timeline().last_index()
    }
}
