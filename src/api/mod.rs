//! Public chart facade.
//!
//! `RaceChart` is split across several `impl` blocks: construction, playback
//! control, render dispatch, observer plumbing and snapshots each live in
//! their own file and share the `EngineCore` state.

mod chart_model;
mod chart_presentation;
mod chart_runtime;
mod engine;
mod engine_accessors;
mod engine_config;
mod engine_core;
mod engine_init;
mod engine_snapshot;
mod json_contract;
mod observer_dispatch;
mod observer_registry;
mod playback_controller;
mod render_dispatcher;
mod value_format;

pub use engine::RaceChart;
pub use engine_config::{
    DEFAULT_TICK_INTERVAL_MS, DEFAULT_TOTAL_PLAYBACK_DURATION_MS, MIN_TICK_INTERVAL_MS,
    RaceChartConfig,
};
pub use engine_snapshot::RaceSnapshot;
pub use json_contract::{RACE_SNAPSHOT_JSON_SCHEMA_V1, RaceSnapshotJsonContractV1};
pub use playback_controller::TickOutcome;
pub use value_format::{ValueFormatterFn, format_thousands};
