use super::{
    chart_model::ChartModel, chart_presentation::ChartPresentationState,
    chart_runtime::ChartRuntimeState,
};

/// Internal state used by the public facade (`RaceChart`).
pub(super) struct EngineCore {
    pub(super) model: ChartModel,
    pub(super) presentation: ChartPresentationState,
    pub(super) runtime: ChartRuntimeState,
}
