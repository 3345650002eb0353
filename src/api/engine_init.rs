use tracing::debug;

use crate::core::{DataFeed, LayoutEngine, RankingEngine, RankingPolicy, SeriesStore};
use crate::error::RaceResult;
use crate::playback::{Clock, ManualScheduler, Scheduler};
use crate::render::Renderer;

use super::{
    RaceChart, RaceChartConfig, chart_model::ChartModel,
    chart_presentation::ChartPresentationState, chart_runtime::ChartRuntimeState,
    engine_core::EngineCore,
};

impl<R: Renderer> RaceChart<R> {
    /// Creates a chart over validated series data.
    ///
    /// Nothing is rendered until `render()` or a playback operation is
    /// called.
    pub fn new(
        renderer: R,
        store: SeriesStore,
        config: RaceChartConfig,
        scheduler: impl Scheduler + 'static,
        clock: impl Clock + 'static,
    ) -> RaceResult<Self> {
        config.validate()?;

        let mut ranking = RankingEngine::new(RankingPolicy {
            max_visible_items: config.max_visible_items,
            keep_zero_items: config.keep_zero_items,
        });
        if config.prescan_appeared {
            ranking.prescan(&store);
        }

        debug!(
            frame_count = store.frame_count(),
            series_count = store.series_count(),
            max_visible_items = config.max_visible_items,
            keep_zero_items = config.keep_zero_items,
            prescan_appeared = config.prescan_appeared,
            appeared = ranking.appeared().len(),
            "race chart created"
        );

        let layout = LayoutEngine::new(config.layout);
        Ok(Self {
            renderer,
            core: EngineCore {
                model: ChartModel::new(store, config, ranking),
                presentation: ChartPresentationState::new(layout),
                runtime: ChartRuntimeState::new(Box::new(scheduler), Box::new(clock)),
            },
        })
    }

    /// Builds the store from a data feed. Feed axis titles fill in config
    /// titles the host left unset.
    pub fn from_feed(
        renderer: R,
        feed: DataFeed,
        mut config: RaceChartConfig,
        scheduler: impl Scheduler + 'static,
        clock: impl Clock + 'static,
    ) -> RaceResult<Self> {
        if config.title.is_none() {
            config.title = feed.time_axis_title.clone();
        }
        if config.value_axis_title.is_none() {
            config.value_axis_title = feed.value_axis_title.clone();
        }
        let store = SeriesStore::from_feed(feed)?;
        Self::new(renderer, store, config, scheduler, clock)
    }

    /// Creates a chart driven by a deterministic [`ManualScheduler`].
    ///
    /// The returned scheduler shares state with the one inside the chart;
    /// pop due ticks from it and feed them to `on_tick`.
    pub fn with_manual_driver(
        renderer: R,
        store: SeriesStore,
        config: RaceChartConfig,
    ) -> RaceResult<(Self, ManualScheduler)> {
        let driver = ManualScheduler::new();
        let chart = Self::new(renderer, store, config, driver.clone(), driver.clone())?;
        Ok((chart, driver))
    }
}
