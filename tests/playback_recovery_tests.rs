use race_chart::api::{RaceChart, RaceChartConfig, TickOutcome};
use race_chart::core::{SeriesInput, SeriesStore, Timeline, Viewport};
use race_chart::playback::{ManualScheduler, PlaybackMode};
use race_chart::render::{RaceFrame, RecordingRenderer, Renderer};
use race_chart::{RaceError, RaceResult};

/// Rejects exactly one draw call (1-based) and records the rest.
#[derive(Debug, Default)]
struct FailingOnceRenderer {
    calls: usize,
    fail_on_call: usize,
    frames: Vec<RaceFrame>,
}

impl Renderer for FailingOnceRenderer {
    fn render(&mut self, frame: &RaceFrame) -> RaceResult<()> {
        self.calls += 1;
        if self.calls == self.fail_on_call {
            return Err(RaceError::InvalidData("backend unavailable".to_owned()));
        }
        frame.validate()?;
        self.frames.push(frame.clone());
        Ok(())
    }
}

fn store(series: Vec<SeriesInput>) -> SeriesStore {
    let timeline = Timeline::new(vec![
        "2001".to_owned(),
        "2002".to_owned(),
        "2003".to_owned(),
    ])
    .expect("timeline");
    SeriesStore::new(timeline, series).expect("store")
}

fn config() -> RaceChartConfig {
    RaceChartConfig::new(Viewport::new(1000, 600))
        .with_total_playback_duration_ms(1_000)
        .with_tick_interval_ms(100)
}

fn overtaking_chart(fail_on_call: usize) -> (RaceChart<FailingOnceRenderer>, ManualScheduler) {
    // Beta leads until progress 0.5, where Alpha takes over.
    let store = store(vec![
        SeriesInput::new("Alpha", "#1428A0", vec![10.0, 20.0, 30.0]),
        SeriesInput::new("Beta", "#C7000B", vec![30.0, 18.0, 6.0]),
    ]);
    let renderer = FailingOnceRenderer {
        fail_on_call,
        ..FailingOnceRenderer::default()
    };
    RaceChart::with_manual_driver(renderer, store, config().with_max_visible_items(1))
        .expect("chart init")
}

#[test]
fn failed_tick_pauses_and_play_resumes() {
    let (mut chart, driver) = overtaking_chart(3);
    chart.play().expect("play");

    let first = driver.pop_due(u64::MAX).expect("first tick");
    assert!(matches!(
        chart.on_tick(first).expect("first tick renders"),
        TickOutcome::Rendered { .. }
    ));
    let second = driver.pop_due(u64::MAX).expect("second tick");
    assert!(chart.on_tick(second).is_err());

    assert_eq!(chart.mode(), PlaybackMode::Paused);
    assert_eq!(driver.pending_count(), 0);

    chart.play().expect("resume");
    assert_eq!(chart.mode(), PlaybackMode::Playing);
    assert_eq!(driver.pending_count(), 1);

    let mut last = None;
    while let Some(token) = driver.pop_due(u64::MAX) {
        last = Some(chart.on_tick(token).expect("tick"));
    }
    assert_eq!(last, Some(TickOutcome::Finished));
    assert_eq!(chart.mode(), PlaybackMode::Finished);
}

#[test]
fn rejected_frame_does_not_advance_visible_set_diff() {
    // Calls: play (p=0), ticks p=0.1..0.4, then p=0.5 is rejected.
    let (mut chart, driver) = overtaking_chart(6);
    chart.play().expect("play");
    for _ in 0..4 {
        let token = driver.pop_due(u64::MAX).expect("tick");
        chart.on_tick(token).expect("tick renders");
    }
    let rejected = driver.pop_due(u64::MAX).expect("tick");
    assert!(chart.on_tick(rejected).is_err());
    assert_eq!(
        chart.renderer().frames.last().expect("frame").bars[0].label,
        "Beta"
    );

    chart.play().expect("resume");
    let frame = chart.renderer().frames.last().expect("frame");
    assert_eq!(frame.bars[0].label, "Alpha");
    assert_eq!(frame.diff.entered, vec!["Alpha"]);
    assert_eq!(frame.diff.exited, vec!["Beta"]);
    assert_eq!(frame.exits[0].label, "Beta");
}

#[test]
fn largest_finite_value_plays_and_seeks() {
    let store = store(vec![
        SeriesInput::new("Alpha", "#1428A0", vec![1.0, 1.0, f64::MAX]),
        SeriesInput::new("Beta", "#C7000B", vec![2.0, 2.0, 2.0]),
    ]);
    let (mut chart, driver) =
        RaceChart::with_manual_driver(RecordingRenderer::default(), store, config())
            .expect("chart init");

    chart.play().expect("play");
    let mut last = None;
    while let Some(token) = driver.pop_due(u64::MAX) {
        last = Some(chart.on_tick(token).expect("tick"));
    }
    assert_eq!(last, Some(TickOutcome::Finished));

    chart.seek(2).expect("seek to huge frame");
    let frame = chart.renderer().last_frame().expect("frame");
    assert_eq!(frame.bars[0].label, "Alpha");
    assert!(frame.bars[0].rect.width.is_finite());
}

#[test]
fn progress_just_under_one_finishes_on_next_tick() {
    let store = store(vec![SeriesInput::new(
        "Alpha",
        "#1428A0",
        vec![1.0, 2.0, 3.0],
    )]);
    let config = config().with_total_playback_duration_ms(1_000_000_000_000);
    let (mut chart, driver) =
        RaceChart::with_manual_driver(RecordingRenderer::default(), store, config)
            .expect("chart init");

    chart.play_from(1.0 - 4e-10).expect("play");
    assert_eq!(chart.mode(), PlaybackMode::Playing);

    let token = driver.pop_due(u64::MAX).expect("tick");
    assert_eq!(chart.on_tick(token).expect("tick"), TickOutcome::Finished);
    assert_eq!(chart.mode(), PlaybackMode::Finished);
    assert_eq!(chart.current_frame(), 2);
    assert_eq!(chart.progress(), 1.0);
    assert_eq!(driver.pending_count(), 0);
}
