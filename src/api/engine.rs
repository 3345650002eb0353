use crate::error::RaceResult;
use crate::render::Renderer;

use super::engine_core::EngineCore;

/// Main orchestration facade consumed by host applications.
///
/// `RaceChart` owns the series data, the playback state machine, layout and
/// reconciliation state, and hands finished frames to the renderer. Every
/// mutating operation takes `&mut self`; observer events raised during an
/// operation are delivered once it has fully applied.
pub struct RaceChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) core: EngineCore,
}

impl<R: Renderer> RaceChart<R> {
    /// Renders the currently displayed instant without touching playback.
    ///
    /// Right after construction this paints frame 0.
    pub fn render(&mut self) -> RaceResult<()> {
        let result = self.render_displayed_instant();
        self.flush_events();
        result
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
