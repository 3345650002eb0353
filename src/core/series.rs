use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::Timeline;
use crate::error::{RaceError, RaceResult};
use crate::render::Color;

/// Fallback fill used when a series color string cannot be parsed.
pub const DEFAULT_SERIES_COLOR: &str = "#1f77b4";

/// Label -> value mapping for one (possibly interpolated) instant.
///
/// Iteration order is the series input order, which is what keeps tie
/// ordering stable in the ranking pass.
pub type FrameValues = IndexMap<String, f64>;

/// One series as supplied by the data feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesInput {
    pub label: String,
    #[serde(default = "default_series_color")]
    pub color: String,
    /// `None` marks a missing sample; it reads back as zero.
    pub values: Vec<Option<f64>>,
}

impl SeriesInput {
    #[must_use]
    pub fn new(label: impl Into<String>, color: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            values: values.into_iter().map(Some).collect(),
        }
    }
}

fn default_series_color() -> String {
    DEFAULT_SERIES_COLOR.to_owned()
}

/// Normalized input consumed by the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataFeed {
    pub timeline: Vec<String>,
    pub series: Vec<SeriesInput>,
    #[serde(default)]
    pub time_axis_title: Option<String>,
    #[serde(default)]
    pub value_axis_title: Option<String>,
}

impl DataFeed {
    #[must_use]
    pub fn new(timeline: Vec<String>, series: Vec<SeriesInput>) -> Self {
        Self {
            timeline,
            series,
            time_axis_title: None,
            value_axis_title: None,
        }
    }

    pub fn from_json_str(input: &str) -> RaceResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| RaceError::InvalidData(format!("failed to parse data feed json: {e}")))
    }

    pub fn to_json_pretty(&self) -> RaceResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RaceError::InvalidData(format!("failed to serialize data feed: {e}")))
    }
}

/// One tracked entity with values aligned to the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    label: String,
    color_text: String,
    color: Color,
    values: Vec<f64>,
}

impl Series {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Color string exactly as supplied by the feed.
    #[must_use]
    pub fn color_text(&self) -> &str {
        &self.color_text
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn value_at(&self, frame_index: usize) -> f64 {
        self.values.get(frame_index).copied().unwrap_or(0.0)
    }
}

/// Immutable owner of the timeline and every series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStore {
    timeline: Timeline,
    series: IndexMap<String, Series>,
}

impl SeriesStore {
    pub fn new(timeline: Timeline, inputs: Vec<SeriesInput>) -> RaceResult<Self> {
        let frame_count = timeline.len();
        let mut series = IndexMap::with_capacity(inputs.len());
        let mut missing_count = 0_usize;

        for input in inputs {
            if input.label.is_empty() {
                return Err(RaceError::InvalidData(
                    "series label must not be empty".to_owned(),
                ));
            }
            if input.values.len() != frame_count {
                return Err(RaceError::InvalidData(format!(
                    "series `{}` has {} values but the timeline has {frame_count} frames",
                    input.label,
                    input.values.len()
                )));
            }
            if series.contains_key(&input.label) {
                return Err(RaceError::InvalidData(format!(
                    "series label `{}` is duplicated",
                    input.label
                )));
            }

            let color = Color::from_hex(&input.color).unwrap_or_else(|| {
                warn!(
                    label = %input.label,
                    color = %input.color,
                    "unparsable series color; using default fill"
                );
                Color::from_hex(DEFAULT_SERIES_COLOR).unwrap_or(Color::rgb(0.0, 0.0, 0.0))
            });
            let values = input
                .values
                .iter()
                .map(|value| match value {
                    Some(value) if value.is_finite() => *value,
                    _ => {
                        missing_count += 1;
                        0.0
                    }
                })
                .collect();

            series.insert(
                input.label.clone(),
                Series {
                    label: input.label,
                    color_text: input.color,
                    color,
                    values,
                },
            );
        }

        debug!(
            frame_count,
            series_count = series.len(),
            missing_count,
            "built series store"
        );
        Ok(Self { timeline, series })
    }

    pub fn from_feed(feed: DataFeed) -> RaceResult<Self> {
        let timeline = Timeline::new(feed.timeline)?;
        Self::new(timeline, feed.series)
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.timeline.len()
    }

    #[must_use]
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn series(&self, label: &str) -> Option<&Series> {
        self.series.get(label)
    }

    /// Labels in input order.
    pub fn all_labels(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// Value of `label` at `frame_index`; unknown labels and indices read as zero.
    #[must_use]
    pub fn value_at(&self, label: &str, frame_index: usize) -> f64 {
        self.series
            .get(label)
            .map_or(0.0, |series| series.value_at(frame_index))
    }

    #[must_use]
    pub fn color_of(&self, label: &str) -> Option<Color> {
        self.series.get(label).map(Series::color)
    }

    #[must_use]
    pub fn frame_values(&self, frame_index: usize) -> FrameValues {
        self.series
            .iter()
            .map(|(label, series)| (label.clone(), series.value_at(frame_index)))
            .collect()
    }

    /// Labels that are strictly positive somewhere on the timeline.
    pub fn ever_positive_labels(&self) -> impl Iterator<Item = &str> {
        self.series
            .values()
            .filter(|series| series.values.iter().any(|value| *value > 0.0))
            .map(Series::label)
    }
}
