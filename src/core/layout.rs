use std::collections::HashMap;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::axis_ticks::{
    AXIS_VALUE_MAX_TICKS, AXIS_VALUE_MIN_TICKS, AXIS_VALUE_TARGET_SPACING_PX, AxisTickValues,
    axis_tick_target_count, value_axis_ticks,
};
use crate::core::{Diagnostic, DisplayItem, LinearScale, Viewport};
use crate::error::{RaceError, RaceResult};

const LABEL_WIDTH_CACHE_CAPACITY: usize = 1024;

/// Synchronous text-width query answered by the rendering backend.
pub trait TextMeasurer {
    fn measure_text_width(&self, text: &str, font_size_px: f64) -> f64;
}

impl<F> TextMeasurer for F
where
    F: Fn(&str, f64) -> f64,
{
    fn measure_text_width(&self, text: &str, font_size_px: f64) -> f64 {
        self(text, font_size_px)
    }
}

/// Backend-independent width estimate from per-glyph advance ratios.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedTextMeasurer;

impl TextMeasurer for EstimatedTextMeasurer {
    fn measure_text_width(&self, text: &str, font_size_px: f64) -> f64 {
        let units = text.chars().fold(0.0, |acc, ch| {
            acc + match ch {
                '0'..='9' => 0.62,
                '.' | ',' | ':' => 0.34,
                '-' | '+' | '%' => 0.42,
                ' ' => 0.33,
                'A'..='Z' => 0.68,
                _ if ch.is_ascii() => 0.56,
                // CJK and other wide glyphs take roughly a full em.
                _ => 1.0,
            }
        });
        units * font_size_px
    }
}

/// Pixel tuning for bar geometry and margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutTuning {
    pub max_bar_height_px: f64,
    pub min_bar_height_px: f64,
    pub bar_padding_px: f64,
    pub min_bar_padding_px: f64,
    pub top_padding_px: f64,
    pub bottom_padding_px: f64,
    pub label_font_size_px: f64,
    pub value_font_size_px: f64,
    pub label_gutter_px: f64,
    pub value_gutter_px: f64,
    pub fallback_margin_px: f64,
    pub value_headroom_ratio: f64,
}

impl Default for LayoutTuning {
    fn default() -> Self {
        Self {
            max_bar_height_px: 30.0,
            min_bar_height_px: 20.0,
            bar_padding_px: 15.0,
            min_bar_padding_px: 2.0,
            top_padding_px: 50.0,
            bottom_padding_px: 30.0,
            label_font_size_px: 14.0,
            value_font_size_px: 14.0,
            label_gutter_px: 10.0,
            value_gutter_px: 10.0,
            fallback_margin_px: 40.0,
            value_headroom_ratio: 0.1,
        }
    }
}

impl LayoutTuning {
    pub fn validate(self) -> RaceResult<Self> {
        for (name, value) in [
            ("max_bar_height_px", self.max_bar_height_px),
            ("min_bar_height_px", self.min_bar_height_px),
            ("label_font_size_px", self.label_font_size_px),
            ("value_font_size_px", self.value_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(RaceError::InvalidConfig(format!(
                    "layout `{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("bar_padding_px", self.bar_padding_px),
            ("min_bar_padding_px", self.min_bar_padding_px),
            ("top_padding_px", self.top_padding_px),
            ("bottom_padding_px", self.bottom_padding_px),
            ("label_gutter_px", self.label_gutter_px),
            ("value_gutter_px", self.value_gutter_px),
            ("fallback_margin_px", self.fallback_margin_px),
            ("value_headroom_ratio", self.value_headroom_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RaceError::InvalidConfig(format!(
                    "layout `{name}` must be finite and >= 0"
                )));
            }
        }
        if self.min_bar_height_px > self.max_bar_height_px {
            return Err(RaceError::InvalidConfig(
                "layout min bar height must be <= max bar height".to_owned(),
            ));
        }
        if self.min_bar_padding_px > self.bar_padding_px {
            return Err(RaceError::InvalidConfig(
                "layout min bar padding must be <= bar padding".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Geometry derived for one rendered instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub item_count: usize,
    pub bar_height: f64,
    pub bar_padding_inner: f64,
    pub bar_padding_outer: f64,
    pub left_margin: f64,
    pub right_margin: f64,
    pub value_domain: (f64, f64),
    /// Absolute x pixels covered by the value axis.
    pub value_range: (f64, f64),
    pub plot_top: f64,
    pub plot_height: f64,
}

impl LayoutMetrics {
    /// Top edge of the bar at `rank`.
    #[must_use]
    pub fn bar_top(&self, rank: usize) -> f64 {
        self.plot_top
            + self.bar_padding_outer
            + rank as f64 * (self.bar_height + self.bar_padding_inner)
    }

    /// Pixels occupied by the current bars, outer padding included.
    #[must_use]
    pub fn bars_extent(&self) -> f64 {
        let count = self.item_count as f64;
        count * self.bar_height
            + (count - 1.0).max(0.0) * self.bar_padding_inner
            + 2.0 * self.bar_padding_outer
    }

    pub fn value_scale(&self) -> RaceResult<LinearScale> {
        LinearScale::new(self.value_domain, self.value_range)
    }

    /// Bar length for `value`, never negative.
    #[must_use]
    pub fn bar_width(&self, value: f64) -> f64 {
        let (domain_start, domain_end) = self.value_domain;
        let (range_start, range_end) = self.value_range;
        let span = domain_end - domain_start;
        if !value.is_finite() || span <= 0.0 {
            return 0.0;
        }
        (((value - domain_start) / span) * (range_end - range_start)).max(0.0)
    }

    /// Tick values on the value axis for the available pixel span.
    #[must_use]
    pub fn value_ticks(&self) -> AxisTickValues {
        let span_px = self.value_range.1 - self.value_range.0;
        let count = axis_tick_target_count(
            span_px,
            AXIS_VALUE_TARGET_SPACING_PX,
            AXIS_VALUE_MIN_TICKS,
            AXIS_VALUE_MAX_TICKS,
        );
        value_axis_ticks(self.value_domain, count)
    }
}

/// Result of one layout pass plus the diagnostics it raised.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOutcome {
    pub metrics: LayoutMetrics,
    pub diagnostics: Vec<Diagnostic>,
}

/// Computes bar geometry, margins and the value scale.
///
/// Label widths are cached per `(text, font size)`; the cache is dropped
/// wholesale once it reaches its bound.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    tuning: LayoutTuning,
    label_width_cache: HashMap<(String, OrderedFloat<f64>), f64>,
}

impl LayoutEngine {
    #[must_use]
    pub fn new(tuning: LayoutTuning) -> Self {
        Self {
            tuning,
            label_width_cache: HashMap::new(),
        }
    }

    #[must_use]
    pub fn tuning(&self) -> LayoutTuning {
        self.tuning
    }

    #[must_use]
    pub fn cached_label_widths(&self) -> usize {
        self.label_width_cache.len()
    }

    /// Forgets cached widths, e.g. after the measurer changed.
    pub fn clear_label_width_cache(&mut self) {
        self.label_width_cache.clear();
    }

    pub fn compute(
        &mut self,
        items: &[DisplayItem],
        viewport: Viewport,
        measurer: &dyn TextMeasurer,
        formatter: &dyn Fn(f64) -> String,
    ) -> LayoutOutcome {
        let tuning = self.tuning;
        let mut diagnostics = Vec::new();

        let plot_top = tuning.top_padding_px;
        let plot_height =
            (f64::from(viewport.height) - tuning.top_padding_px - tuning.bottom_padding_px)
                .max(0.0);
        let (bar_height, bar_padding_inner) = resolve_bar_geometry(tuning, items.len(), plot_height);

        let mut widest_label: Option<f64> = Some(0.0);
        for item in items {
            let width = self.measure_label(&item.label, measurer);
            widest_label = match (widest_label, width) {
                (Some(widest), Some(width)) => Some(widest.max(width)),
                _ => {
                    diagnostics.push(Diagnostic::MeasurementFallback {
                        text: item.label.clone(),
                    });
                    None
                }
            };
            if widest_label.is_none() {
                break;
            }
        }
        let left_margin = widest_label
            .map_or(tuning.fallback_margin_px, |width| width + tuning.label_gutter_px);

        let mut widest_value: Option<f64> = Some(0.0);
        for item in items {
            let text = formatter(item.value);
            let width = checked_width(measurer.measure_text_width(&text, tuning.value_font_size_px));
            widest_value = match (widest_value, width) {
                (Some(widest), Some(width)) => Some(widest.max(width)),
                _ => {
                    diagnostics.push(Diagnostic::MeasurementFallback { text });
                    None
                }
            };
            if widest_value.is_none() {
                break;
            }
        }
        let right_margin = widest_value
            .map_or(tuning.fallback_margin_px, |width| width + tuning.value_gutter_px);

        let max_value = items
            .iter()
            .map(|item| item.value)
            .filter(|value| value.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        let value_domain = if max_value > 0.0 {
            // Headroom saturates instead of overflowing for values near `f64::MAX`.
            (0.0, (max_value * (1.0 + tuning.value_headroom_ratio)).min(f64::MAX))
        } else {
            diagnostics.push(Diagnostic::DegenerateScale);
            (0.0, 1.0)
        };

        let range_start = left_margin;
        let range_end = (f64::from(viewport.width) - right_margin).max(range_start + 1.0);

        for diagnostic in &diagnostics {
            match diagnostic {
                Diagnostic::MeasurementFallback { text } => {
                    warn!(text = %text, "text measurement failed; using fallback margin");
                }
                Diagnostic::DegenerateScale => {
                    debug!("all visible values are zero; using [0, 1] value domain");
                }
                Diagnostic::StaleTickIgnored { .. } => {}
            }
        }

        LayoutOutcome {
            metrics: LayoutMetrics {
                item_count: items.len(),
                bar_height,
                bar_padding_inner,
                bar_padding_outer: bar_padding_inner * 0.5,
                left_margin,
                right_margin,
                value_domain,
                value_range: (range_start, range_end),
                plot_top,
                plot_height,
            },
            diagnostics,
        }
    }

    fn measure_label(&mut self, label: &str, measurer: &dyn TextMeasurer) -> Option<f64> {
        let font_size = self.tuning.label_font_size_px;
        let key = (label.to_owned(), OrderedFloat(font_size));
        if let Some(width) = self.label_width_cache.get(&key) {
            return Some(*width);
        }

        let width = checked_width(measurer.measure_text_width(label, font_size))?;
        if self.label_width_cache.len() >= LABEL_WIDTH_CACHE_CAPACITY {
            self.label_width_cache.clear();
        }
        self.label_width_cache.insert(key, width);
        Some(width)
    }
}

fn checked_width(width: f64) -> Option<f64> {
    (width.is_finite() && width >= 0.0).then_some(width)
}

/// Returns `(bar_height, inner_padding)` for `item_count` bars.
///
/// Padding is compressed toward its minimum before the bar height drops
/// below `min_bar_height_px`.
fn resolve_bar_geometry(tuning: LayoutTuning, item_count: usize, plot_height: f64) -> (f64, f64) {
    let count = item_count.max(1) as f64;
    let padding = tuning.bar_padding_px;

    let height = ((plot_height - padding * count) / count)
        .floor()
        .min(tuning.max_bar_height_px);
    if height >= tuning.min_bar_height_px {
        return (height, padding);
    }

    let padding_at_min_height = (plot_height - tuning.min_bar_height_px * count) / count;
    if padding_at_min_height >= tuning.min_bar_padding_px {
        return (tuning.min_bar_height_px, padding_at_min_height.min(padding));
    }

    let padding = tuning.min_bar_padding_px;
    let height = ((plot_height - padding * count) / count).floor().max(1.0);
    (height, padding)
}
