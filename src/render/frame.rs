use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{RaceError, RaceResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive, VisibleSetDiff};

/// Whether a bar is new this frame or carried over from the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarPhase {
    Enter,
    Update,
}

/// Everything needed to draw one visible bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarInstruction {
    pub label: String,
    pub rank: usize,
    pub value: f64,
    pub phase: BarPhase,
    pub rect: RectPrimitive,
    /// Entity name, right-aligned in the left margin.
    pub label_text: TextPrimitive,
    /// Formatted value just past the bar end; absent when the formatter
    /// returned an empty string.
    pub value_text: Option<TextPrimitive>,
}

/// A bar that left the visible set since the previous frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitInstruction {
    pub label: String,
    pub last_rank: usize,
    pub last_rect: RectPrimitive,
}

/// One value-axis tick with its label and grid line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: f64,
    pub x: f64,
    pub label: Option<TextPrimitive>,
    pub grid_line: LinePrimitive,
}

/// Backend-agnostic scene for one bar race draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceFrame {
    pub viewport: Viewport,
    pub frame_index: usize,
    pub progress: f64,
    pub bars: Vec<BarInstruction>,
    pub exits: Vec<ExitInstruction>,
    pub ticks: Vec<AxisTick>,
    pub timestamp: Option<TextPrimitive>,
    pub title: Option<TextPrimitive>,
    pub value_axis_title: Option<TextPrimitive>,
    pub diff: VisibleSetDiff,
}

impl RaceFrame {
    #[must_use]
    pub fn new(viewport: Viewport, frame_index: usize, progress: f64) -> Self {
        Self {
            viewport,
            frame_index,
            progress,
            bars: Vec::new(),
            exits: Vec::new(),
            ticks: Vec::new(),
            timestamp: None,
            title: None,
            value_axis_title: None,
            diff: VisibleSetDiff::default(),
        }
    }

    #[must_use]
    pub fn bar(&self, label: &str) -> Option<&BarInstruction> {
        self.bars.iter().find(|bar| bar.label == label)
    }

    /// Visible labels, highest rank first.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.bars.iter().map(|bar| bar.label.as_str())
    }

    pub fn validate(&self) -> RaceResult<()> {
        self.viewport.validate()?;
        if !self.progress.is_finite() || !(0.0..=1.0).contains(&self.progress) {
            return Err(RaceError::InvalidData(
                "frame progress must be finite and in [0, 1]".to_owned(),
            ));
        }

        for bar in &self.bars {
            bar.rect.validate()?;
            bar.label_text.validate()?;
            if let Some(text) = &bar.value_text {
                text.validate()?;
            }
        }
        for exit in &self.exits {
            exit.last_rect.validate()?;
        }
        for tick in &self.ticks {
            tick.grid_line.validate()?;
            if let Some(label) = &tick.label {
                label.validate()?;
            }
        }
        for text in [&self.timestamp, &self.title, &self.value_axis_title]
            .into_iter()
            .flatten()
        {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty() && self.exits.is_empty()
    }
}
