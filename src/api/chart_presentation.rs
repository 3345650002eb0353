use crate::core::{DisplayItem, EstimatedTextMeasurer, LayoutEngine, LayoutMetrics, TextMeasurer};
use crate::render::Reconciler;

use super::value_format::{ValueFormatterFn, default_value_formatter};

/// Presentation state grouped separately from the chart model.
pub(super) struct ChartPresentationState {
    pub(super) value_formatter: ValueFormatterFn,
    pub(super) measurer: Box<dyn TextMeasurer>,
    pub(super) layout: LayoutEngine,
    pub(super) reconciler: Reconciler,
    pub(super) last_items: Vec<DisplayItem>,
    pub(super) last_metrics: Option<LayoutMetrics>,
    pub(super) frames_rendered: u64,
}

impl ChartPresentationState {
    #[must_use]
    pub(super) fn new(layout: LayoutEngine) -> Self {
        Self {
            value_formatter: default_value_formatter(),
            measurer: Box::new(EstimatedTextMeasurer),
            layout,
            reconciler: Reconciler::new(),
            last_items: Vec::new(),
            last_metrics: None,
            frames_rendered: 0,
        }
    }
}
