//! race-chart: an animated bar chart race engine.
//!
//! Feed it a timeline of labels and one value series per entity; it ranks
//! the entities at every (interpolated) instant, lays out horizontal bars and
//! hands backend-agnostic [`render::RaceFrame`]s to a [`render::Renderer`].
//! Playback is tick driven through injected [`playback::Scheduler`] and
//! [`playback::Clock`] capabilities.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod ingest;
pub mod playback;
pub mod render;
pub mod telemetry;

pub use api::{RaceChart, RaceChartConfig, RaceSnapshot, TickOutcome};
pub use error::{RaceError, RaceResult};
