//! Host-facing hooks that sit outside the playback core.

pub mod observers;

pub use observers::{FnObserver, ObserverContext, RaceEvent, RaceObserver};
