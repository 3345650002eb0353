use crate::error::RaceResult;
use crate::render::{RaceFrame, Renderer};

/// Keeps every validated frame it receives, oldest first.
///
/// Useful for headless exports and for asserting on the exact draw
/// instructions in tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<RaceFrame>,
}

impl RecordingRenderer {
    #[must_use]
    pub fn frames(&self) -> &[RaceFrame] {
        &self.frames
    }

    #[must_use]
    pub fn last_frame(&self) -> Option<&RaceFrame> {
        self.frames.last()
    }

    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &RaceFrame) -> RaceResult<()> {
        frame.validate()?;
        self.frames.push(frame.clone());
        Ok(())
    }
}
