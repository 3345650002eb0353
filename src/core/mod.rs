pub mod axis_ticks;
pub mod diagnostics;
pub mod interpolation;
pub mod layout;
pub mod ranking;
pub mod scale;
pub mod series;
pub mod timeline;
pub mod types;

pub use diagnostics::{Diagnostic, DiagnosticLog};
pub use interpolation::{interpolate, lerp};
pub use layout::{
    EstimatedTextMeasurer, LayoutEngine, LayoutMetrics, LayoutOutcome, LayoutTuning, TextMeasurer,
};
pub use ranking::{AppearedSet, DEFAULT_MAX_VISIBLE_ITEMS, DisplayItem, RankingEngine, RankingPolicy};
pub use scale::LinearScale;
pub use series::{DEFAULT_SERIES_COLOR, DataFeed, FrameValues, Series, SeriesInput, SeriesStore};
pub use timeline::Timeline;
pub use types::Viewport;
