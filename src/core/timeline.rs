use serde::{Deserialize, Serialize};

use crate::error::{RaceError, RaceResult};

/// Ordered frame labels; index `0..len()` is the canonical frame index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Timeline {
    labels: Vec<String>,
}

impl Timeline {
    pub fn new(labels: Vec<String>) -> RaceResult<Self> {
        if labels.is_empty() {
            return Err(RaceError::InvalidData(
                "timeline must contain at least one frame".to_owned(),
            ));
        }
        Ok(Self { labels })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.labels.len() - 1
    }

    #[must_use]
    pub fn label(&self, frame_index: usize) -> Option<&str> {
        self.labels.get(frame_index).map(String::as_str)
    }

    #[must_use]
    pub fn first_label(&self) -> &str {
        &self.labels[0]
    }

    #[must_use]
    pub fn last_label(&self) -> &str {
        &self.labels[self.last_index()]
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Maps a frame index onto the whole-timeline progress fraction.
    #[must_use]
    pub fn frame_to_progress(&self, frame_index: usize) -> f64 {
        if self.last_index() == 0 {
            return 1.0;
        }
        frame_index.min(self.last_index()) as f64 / self.last_index() as f64
    }

    /// Splits a progress fraction into `(frame_index, sub_progress)`.
    ///
    /// `frame_index` never exceeds `last_index()`; at the last frame the
    /// sub-progress is always zero.
    #[must_use]
    pub fn split_progress(&self, progress: f64) -> (usize, f64) {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let last = self.last_index();
        if last == 0 {
            return (0, 0.0);
        }
        let mut scaled = progress * last as f64;
        // Undo the rounding of `frame_to_progress` so exact frames split back exactly.
        if (scaled - scaled.round()).abs() < 1e-9 {
            scaled = scaled.round();
        }
        let frame_index = (scaled.floor() as usize).min(last);
        if frame_index == last {
            return (last, 0.0);
        }
        (frame_index, scaled - frame_index as f64)
    }
}

impl TryFrom<Vec<String>> for Timeline {
    type Error = RaceError;

    fn try_from(labels: Vec<String>) -> RaceResult<Self> {
        Self::new(labels)
    }
}

impl From<Timeline> for Vec<String> {
    fn from(timeline: Timeline) -> Self {
        timeline.labels
    }
}
