use tracing::trace;

use crate::core::{DisplayItem, FrameValues, LayoutMetrics, interpolate};
use crate::error::RaceResult;
use crate::extensions::RaceEvent;
use crate::render::{
    AxisTick, BarInstruction, BarPhase, Color, LinePrimitive, PlacedBar, RaceFrame, RectPrimitive,
    Renderer, TextHAlign, TextPrimitive,
};

use super::RaceChart;
use super::chart_model::DisplayedInstant;

const VALUE_TEXT_OFFSET_PX: f64 = 5.0;
const TIMESTAMP_FONT_SIZE_PX: f64 = 24.0;
const TIMESTAMP_INSET_PX: f64 = 10.0;
const TITLE_FONT_SIZE_PX: f64 = 18.0;
const AXIS_LABEL_OFFSET_PX: f64 = 10.0;
const GRID_STROKE_WIDTH_PX: f64 = 1.0;

fn label_text_color() -> Color {
    Color::from_rgb8(0x33, 0x33, 0x33)
}

fn timestamp_color() -> Color {
    Color::from_rgb8(0x66, 0x66, 0x66)
}

fn grid_color() -> Color {
    Color::from_rgb8(0xdd, 0xdd, 0xdd)
}

impl<R: Renderer> RaceChart<R> {
    /// Renders an exact timeline frame (no interpolation).
    pub(super) fn render_exact_frame(&mut self, frame_index: usize) -> RaceResult<()> {
        let progress = self.core.model.store.timeline().frame_to_progress(frame_index);
        let values = self.core.model.store.frame_values(frame_index);
        self.render_instant(DisplayedInstant {
            frame_index,
            sub_progress: 0.0,
            progress,
            values,
        })
    }

    /// Renders the instant at overall timeline `progress`.
    pub(super) fn render_progress(&mut self, progress: f64) -> RaceResult<()> {
        let (frame_index, sub_progress) = self.core.model.store.timeline().split_progress(progress);
        if sub_progress <= 0.0 {
            return self.render_exact_frame(frame_index);
        }
        let values = self.values_at_progress(progress);
        self.render_instant(DisplayedInstant {
            frame_index,
            sub_progress,
            progress,
            values,
        })
    }

    /// Redraws the instant last shown, e.g. after a resize.
    pub(super) fn render_displayed_instant(&mut self) -> RaceResult<()> {
        let instant = self.core.model.displayed.clone();
        self.render_instant(instant)
    }

    /// Ranks, lays out, reconciles and renders one instant.
    ///
    /// The appeared-set and the reconciler only advance once the renderer
    /// accepted the frame.
    pub(super) fn render_instant(&mut self, instant: DisplayedInstant) -> RaceResult<()> {
        let items = self
            .core
            .model
            .ranking
            .preview(&instant.values, &self.core.model.store);
        let viewport = self.core.model.viewport;

        let presentation = &mut self.core.presentation;
        let outcome = presentation.layout.compute(
            &items,
            viewport,
            presentation.measurer.as_ref(),
            &*presentation.value_formatter,
        );
        self.core.runtime.diagnostics.extend(outcome.diagnostics);
        let metrics = outcome.metrics;

        let frame = self.build_race_frame(&instant, &items, &metrics)?;
        frame.validate()?;
        self.renderer.render(&frame)?;

        trace!(
            frame_index = instant.frame_index,
            sub_progress = instant.sub_progress,
            visible = items.len(),
            entered = frame.diff.entered.len(),
            exited = frame.diff.exited.len(),
            "rendered race frame"
        );

        self.core.model.ranking.record(&instant.values);
        let drawn: Vec<PlacedBar<'_>> = frame
            .bars
            .iter()
            .map(|bar| PlacedBar {
                label: &bar.label,
                rank: bar.rank,
                rect: bar.rect,
            })
            .collect();
        self.core.presentation.reconciler.commit(&drawn);

        let visible_items = items.len();
        let presentation = &mut self.core.presentation;
        presentation.last_items = items;
        presentation.last_metrics = Some(metrics);
        presentation.frames_rendered += 1;
        let frame_index = instant.frame_index;
        self.core.model.displayed = instant;
        self.queue_event(RaceEvent::Rendered {
            frame_index,
            visible_items,
        });
        Ok(())
    }

    fn build_race_frame(
        &self,
        instant: &DisplayedInstant,
        items: &[DisplayItem],
        metrics: &LayoutMetrics,
    ) -> RaceResult<RaceFrame> {
        let viewport = self.core.model.viewport;
        let tuning = self.core.presentation.layout.tuning();
        let formatter = &self.core.presentation.value_formatter;
        let mut frame = RaceFrame::new(viewport, instant.frame_index, instant.progress);

        let placed: Vec<PlacedBar<'_>> = items
            .iter()
            .map(|item| PlacedBar {
                label: &item.label,
                rank: item.rank,
                rect: RectPrimitive::new(
                    metrics.value_range.0,
                    metrics.bar_top(item.rank),
                    metrics.bar_width(item.value),
                    metrics.bar_height,
                    item.color,
                ),
            })
            .collect();
        let (diff, exits) = self.core.presentation.reconciler.diff(&placed);

        let label_x = metrics.left_margin - tuning.label_gutter_px * 0.5;
        for (item, bar) in items.iter().zip(&placed) {
            let phase = if diff.entered.iter().any(|label| label == &item.label) {
                BarPhase::Enter
            } else {
                BarPhase::Update
            };
            let center_y = bar.rect.center_y();
            let value_text = formatter(item.value);
            frame.bars.push(BarInstruction {
                label: item.label.clone(),
                rank: item.rank,
                value: item.value,
                phase,
                rect: bar.rect,
                label_text: TextPrimitive::new(
                    item.label.clone(),
                    label_x,
                    center_y,
                    tuning.label_font_size_px,
                    label_text_color(),
                    TextHAlign::Right,
                ),
                value_text: (!value_text.is_empty()).then(|| {
                    TextPrimitive::new(
                        value_text,
                        bar.rect.right() + VALUE_TEXT_OFFSET_PX,
                        center_y,
                        tuning.value_font_size_px,
                        label_text_color(),
                        TextHAlign::Left,
                    )
                }),
            });
        }
        frame.exits = exits;
        frame.diff = diff;

        let scale = metrics.value_scale()?;
        let grid_top = metrics.plot_top;
        let grid_bottom = metrics.plot_top + metrics.plot_height.max(1.0);
        for value in metrics.value_ticks() {
            let x = scale.map(value);
            let text = formatter(value);
            frame.ticks.push(AxisTick {
                value,
                x,
                label: (!text.is_empty()).then(|| {
                    TextPrimitive::new(
                        text,
                        x,
                        grid_top - AXIS_LABEL_OFFSET_PX,
                        tuning.value_font_size_px,
                        timestamp_color(),
                        TextHAlign::Center,
                    )
                }),
                grid_line: LinePrimitive::new(
                    x,
                    grid_top,
                    x,
                    grid_bottom,
                    GRID_STROKE_WIDTH_PX,
                    grid_color(),
                ),
            });
        }

        if let Some(label) = self.core.model.store.timeline().label(instant.frame_index) {
            if !label.is_empty() {
                frame.timestamp = Some(TextPrimitive::new(
                    label,
                    f64::from(viewport.width) - TIMESTAMP_INSET_PX,
                    f64::from(viewport.height) - tuning.bottom_padding_px - TIMESTAMP_FONT_SIZE_PX,
                    TIMESTAMP_FONT_SIZE_PX,
                    timestamp_color(),
                    TextHAlign::Right,
                ));
            }
        }

        let config = &self.core.model.config;
        if let Some(title) = config.title.as_deref().filter(|title| !title.is_empty()) {
            frame.title = Some(TextPrimitive::new(
                title,
                TIMESTAMP_INSET_PX,
                tuning.top_padding_px * 0.3,
                TITLE_FONT_SIZE_PX,
                label_text_color(),
                TextHAlign::Left,
            ));
        }
        if let Some(title) = config
            .value_axis_title
            .as_deref()
            .filter(|title| !title.is_empty())
        {
            frame.value_axis_title = Some(TextPrimitive::new(
                title,
                metrics.value_range.1,
                tuning.top_padding_px * 0.3,
                tuning.value_font_size_px,
                timestamp_color(),
                TextHAlign::Right,
            ));
        }

        Ok(frame)
    }

    /// Values the chart would display at overall `progress`.
    #[must_use]
    pub fn values_at_progress(&self, progress: f64) -> FrameValues {
        let store = &self.core.model.store;
        let (frame_index, sub_progress) = store.timeline().split_progress(progress);
        if sub_progress <= 0.0 {
            return store.frame_values(frame_index);
        }
        interpolate(
            &store.frame_values(frame_index),
            &store.frame_values(frame_index + 1),
            sub_progress,
        )
    }
}
