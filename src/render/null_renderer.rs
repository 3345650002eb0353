use crate::error::RaceResult;
use crate::render::{RaceFrame, Renderer};

/// No-op renderer used by tests and headless engine usage.
///
/// It still validates frame content so tests can catch invalid geometry before
/// a real backend is introduced.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: u64,
    pub last_bar_count: usize,
    pub last_exit_count: usize,
    pub last_tick_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RaceFrame) -> RaceResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_bar_count = frame.bars.len();
        self.last_exit_count = frame.exits.len();
        self.last_tick_count = frame.ticks.len();
        Ok(())
    }
}
