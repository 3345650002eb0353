mod frame;
mod null_renderer;
mod primitives;
mod reconcile;
mod recording_renderer;

pub use frame::{AxisTick, BarInstruction, BarPhase, ExitInstruction, RaceFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};
pub use reconcile::{PlacedBar, Reconciler, VisibleSetDiff};
pub use recording_renderer::RecordingRenderer;

use crate::error::RaceResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, validated `RaceFrame`; enter,
/// update and exit are already classified so a backend can animate each
/// differently without tracking state of its own.
pub trait Renderer {
    fn render(&mut self, frame: &RaceFrame) -> RaceResult<()>;
}
