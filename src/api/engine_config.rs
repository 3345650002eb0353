use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_MAX_VISIBLE_ITEMS, LayoutTuning, Viewport};
use crate::error::{RaceError, RaceResult};

pub const DEFAULT_TOTAL_PLAYBACK_DURATION_MS: u64 = 20_000;
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;
pub const MIN_TICK_INTERVAL_MS: u64 = 10;

/// Public chart bootstrap configuration.
///
/// Every field has a documented default, so a host can persist only the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceChartConfig {
    #[serde(default)]
    pub viewport: Viewport,
    /// Upper bound on bars drawn per frame.
    #[serde(default = "default_max_visible_items")]
    pub max_visible_items: usize,
    /// Keep entities that have shown a positive value once, even at zero.
    #[serde(default)]
    pub keep_zero_items: bool,
    /// Seed the appeared set from the whole timeline at construction.
    #[serde(default)]
    pub prescan_appeared: bool,
    /// Wall time for a full pass from the first to the last frame.
    #[serde(default = "default_total_playback_duration_ms")]
    pub total_playback_duration_ms: u64,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub value_axis_title: Option<String>,
    #[serde(default)]
    pub layout: LayoutTuning,
}

impl Default for RaceChartConfig {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl RaceChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            max_visible_items: default_max_visible_items(),
            keep_zero_items: false,
            prescan_appeared: false,
            total_playback_duration_ms: default_total_playback_duration_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            title: None,
            value_axis_title: None,
            layout: LayoutTuning::default(),
        }
    }

    #[must_use]
    pub fn with_max_visible_items(mut self, max_visible_items: usize) -> Self {
        self.max_visible_items = max_visible_items;
        self
    }

    #[must_use]
    pub fn with_keep_zero_items(mut self, keep_zero_items: bool) -> Self {
        self.keep_zero_items = keep_zero_items;
        self
    }

    #[must_use]
    pub fn with_prescan_appeared(mut self, prescan_appeared: bool) -> Self {
        self.prescan_appeared = prescan_appeared;
        self
    }

    #[must_use]
    pub fn with_total_playback_duration_ms(mut self, duration_ms: u64) -> Self {
        self.total_playback_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_tick_interval_ms(mut self, interval_ms: u64) -> Self {
        self.tick_interval_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_value_axis_title(mut self, title: impl Into<String>) -> Self {
        self.value_axis_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: LayoutTuning) -> Self {
        self.layout = layout;
        self
    }

    /// Checks every field; returns the first violation as `InvalidConfig`
    /// (or `InvalidViewport` for the viewport).
    pub fn validate(&self) -> RaceResult<()> {
        self.viewport.validate()?;
        if self.max_visible_items == 0 {
            return Err(RaceError::InvalidConfig(
                "max_visible_items must be > 0".to_owned(),
            ));
        }
        if self.total_playback_duration_ms == 0 {
            return Err(RaceError::InvalidConfig(
                "total_playback_duration_ms must be > 0".to_owned(),
            ));
        }
        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(RaceError::InvalidConfig(format!(
                "tick_interval_ms must be >= {MIN_TICK_INTERVAL_MS}, got {}",
                self.tick_interval_ms
            )));
        }
        self.layout.validate()?;
        Ok(())
    }

    pub fn to_json_pretty(&self) -> RaceResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RaceError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn from_json_str(input: &str) -> RaceResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| RaceError::InvalidData(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_max_visible_items() -> usize {
    DEFAULT_MAX_VISIBLE_ITEMS
}

fn default_total_playback_duration_ms() -> u64 {
    DEFAULT_TOTAL_PLAYBACK_DURATION_MS
}

fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}
