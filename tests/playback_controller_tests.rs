use race_chart::api::{RaceChart, RaceChartConfig, TickOutcome};
use race_chart::core::{Diagnostic, SeriesInput, SeriesStore, Timeline, Viewport};
use race_chart::playback::{ManualScheduler, PlaybackMode};
use race_chart::render::RecordingRenderer;
use race_chart::RaceError;

fn store(frames: usize) -> SeriesStore {
    let labels: Vec<String> = (0..frames)
        .map(|index| format!("2020-{:02}", index + 1))
        .collect();
    let timeline = Timeline::new(labels).expect("timeline");
    let ramp = |start: f64, step: f64| -> Vec<f64> {
        (0..frames).map(|i| start + step * i as f64).collect()
    };
    SeriesStore::new(
        timeline,
        vec![
            SeriesInput::new("Alpha", "#1428A0", ramp(10.0, 10.0)),
            SeriesInput::new("Beta", "#C7000B", ramp(30.0, -12.5)),
            SeriesInput::new("Gamma", "#FF6900", ramp(0.0, 20.0)),
        ],
    )
    .expect("store")
}

fn config() -> RaceChartConfig {
    RaceChartConfig::new(Viewport::new(1000, 600))
        .with_total_playback_duration_ms(1_000)
        .with_tick_interval_ms(100)
}

fn chart(frames: usize) -> (RaceChart<RecordingRenderer>, ManualScheduler) {
    RaceChart::with_manual_driver(RecordingRenderer::default(), store(frames), config())
        .expect("chart init")
}

fn pump(
    chart: &mut RaceChart<RecordingRenderer>,
    driver: &ManualScheduler,
    until_ms: u64,
) -> Vec<TickOutcome> {
    let mut outcomes = Vec::new();
    while let Some(token) = driver.pop_due(until_ms) {
        outcomes.push(chart.on_tick(token).expect("tick"));
    }
    outcomes
}

#[test]
fn initial_render_paints_frame_zero_without_playing() {
    let (mut chart, driver) = chart(3);
    chart.render().expect("render");

    assert_eq!(chart.mode(), PlaybackMode::Idle);
    assert_eq!(driver.pending_count(), 0);
    let frame = chart.renderer().last_frame().expect("frame");
    assert_eq!(frame.frame_index, 0);
    assert_eq!(frame.timestamp.as_ref().expect("timestamp").text, "2020-01");
}

#[test]
fn full_playback_finishes_on_exact_last_frame() {
    let (mut chart, driver) = chart(3);
    chart.play().expect("play");
    assert_eq!(chart.mode(), PlaybackMode::Playing);

    let outcomes = pump(&mut chart, &driver, 10_000);
    assert_eq!(outcomes.last(), Some(&TickOutcome::Finished));
    assert_eq!(outcomes.len(), 10);
    assert_eq!(chart.mode(), PlaybackMode::Finished);
    assert_eq!(chart.current_frame(), 2);
    assert_eq!(chart.progress(), 1.0);
    assert_eq!(driver.pending_count(), 0);

    let store = chart.store();
    let last = chart.renderer().last_frame().expect("frame");
    assert_eq!(last.frame_index, 2);
    assert_eq!(last.bars.len(), 3);
    for bar in &last.bars {
        assert_eq!(bar.value, store.value_at(&bar.label, 2));
    }
}

#[test]
fn tick_progress_never_decreases() {
    let (mut chart, driver) = chart(5);
    chart.play().expect("play");

    let mut previous = 0.0;
    for outcome in pump(&mut chart, &driver, 10_000) {
        if let TickOutcome::Rendered { progress, .. } = outcome {
            assert!(progress >= previous);
            previous = progress;
        }
    }
    let rendered: Vec<f64> = chart
        .renderer()
        .frames()
        .iter()
        .map(|frame| frame.progress)
        .collect();
    assert!(rendered.windows(2).all(|pair| pair[1] >= pair[0]));
}

#[test]
fn play_while_playing_is_a_no_op() {
    let (mut chart, driver) = chart(3);
    chart.play().expect("play");
    let rendered = chart.renderer().frame_count();
    chart.play().expect("play again");

    assert_eq!(driver.pending_count(), 1);
    assert_eq!(chart.renderer().frame_count(), rendered);
}

#[test]
fn pause_cancels_tick_and_keeps_instant() {
    let (mut chart, driver) = chart(3);
    chart.play().expect("play");
    pump(&mut chart, &driver, 300);
    let stale = driver.pending_tokens()[0];
    let progress = chart.progress();
    let rendered = chart.renderer().frame_count();

    chart.pause();
    assert_eq!(chart.mode(), PlaybackMode::Paused);
    assert_eq!(driver.pending_count(), 0);
    assert_eq!(driver.cancelled_count(), 1);
    assert_eq!(chart.progress(), progress);
    assert_eq!(chart.renderer().frame_count(), rendered);

    assert_eq!(chart.on_tick(stale).expect("stale tick"), TickOutcome::Stale);
    assert_eq!(chart.renderer().frame_count(), rendered);
    assert!(
        chart
            .diagnostics()
            .any(|diagnostic| matches!(diagnostic, Diagnostic::StaleTickIgnored { .. }))
    );
}

#[test]
fn resume_continues_from_paused_progress() {
    let (mut chart, driver) = chart(3);
    chart.play().expect("play");
    pump(&mut chart, &driver, 400);
    chart.pause();
    let paused_at = chart.progress();

    driver.advance_to(60_000);
    chart.play().expect("resume");
    assert_eq!(chart.progress(), paused_at);

    let outcomes = pump(&mut chart, &driver, 60_100);
    match outcomes.as_slice() {
        [TickOutcome::Rendered { progress, .. }] => {
            assert!((progress - (paused_at + 0.1)).abs() < 1e-9);
        }
        other => panic!("unexpected outcomes: {other:?}"),
    }
}

#[test]
fn toggle_switches_between_play_and_pause() {
    let (mut chart, _driver) = chart(3);
    chart.toggle().expect("toggle on");
    assert_eq!(chart.mode(), PlaybackMode::Playing);
    chart.toggle().expect("toggle off");
    assert_eq!(chart.mode(), PlaybackMode::Paused);
}

#[test]
fn pause_outside_playing_is_a_no_op() {
    let (mut chart, _driver) = chart(3);
    chart.pause();
    assert_eq!(chart.mode(), PlaybackMode::Idle);
}

#[test]
fn seek_during_playback_drags_then_resumes_forward() {
    let (mut chart, driver) = chart(3);
    chart.play().expect("play");
    pump(&mut chart, &driver, 300);

    chart.seek(1).expect("seek");
    assert_eq!(chart.mode(), PlaybackMode::Dragging);
    assert_eq!(chart.current_frame(), 1);
    assert_eq!(chart.progress(), 0.5);
    assert_eq!(driver.pending_count(), 0);
    assert!(pump(&mut chart, &driver, 10_000).is_empty());

    let last = chart.renderer().last_frame().expect("frame");
    assert_eq!(last.frame_index, 1);
    assert_eq!(last.progress, 0.5);

    chart.end_drag().expect("end drag");
    assert_eq!(chart.mode(), PlaybackMode::Playing);
    let outcomes = pump(&mut chart, &driver, driver.now() + 100);
    match outcomes.as_slice() {
        [TickOutcome::Rendered { progress, frame_index }] => {
            assert!(*progress >= 0.5);
            assert_eq!(*frame_index, 1);
        }
        other => panic!("unexpected outcomes: {other:?}"),
    }
}

#[test]
fn drag_from_paused_releases_to_paused() {
    let (mut chart, driver) = chart(4);
    chart.seek(2).expect("seek");
    chart.end_drag().expect("end drag");
    assert_eq!(chart.mode(), PlaybackMode::Paused);
    assert_eq!(chart.current_frame(), 2);
    assert_eq!(driver.pending_count(), 0);
}

#[test]
fn pause_during_drag_changes_resume_target() {
    let (mut chart, driver) = chart(4);
    chart.play().expect("play");
    chart.seek(1).expect("seek");
    chart.pause();
    assert_eq!(chart.mode(), PlaybackMode::Dragging);

    chart.end_drag().expect("end drag");
    assert_eq!(chart.mode(), PlaybackMode::Paused);
    assert_eq!(driver.pending_count(), 0);
}

#[test]
fn releasing_on_last_frame_finishes() {
    let (mut chart, _driver) = chart(3);
    chart.play().expect("play");
    chart.seek(2).expect("seek");
    chart.end_drag().expect("end drag");
    assert_eq!(chart.mode(), PlaybackMode::Finished);
}

#[test]
fn end_drag_outside_drag_is_a_no_op() {
    let (mut chart, _driver) = chart(3);
    chart.end_drag().expect("end drag");
    assert_eq!(chart.mode(), PlaybackMode::Idle);
}

#[test]
fn seek_out_of_range_is_rejected() {
    let (mut chart, _driver) = chart(3);
    let err = chart.seek(3).expect_err("seek past end");
    assert!(matches!(err, RaceError::InvalidData(_)));
    assert_eq!(chart.mode(), PlaybackMode::Idle);
}

#[test]
fn seek_progress_floors_onto_frames() {
    let (mut chart, _driver) = chart(3);
    chart.seek_progress(0.99).expect("seek");
    assert_eq!(chart.current_frame(), 1);
    chart.seek_progress(1.0).expect("seek");
    assert_eq!(chart.current_frame(), 2);
    chart.seek_progress(-3.0).expect("seek");
    assert_eq!(chart.current_frame(), 0);
}

#[test]
fn play_after_finish_restarts_from_first_frame() {
    let (mut chart, driver) = chart(3);
    chart.play().expect("play");
    pump(&mut chart, &driver, 10_000);
    assert_eq!(chart.mode(), PlaybackMode::Finished);

    chart.play().expect("replay");
    assert_eq!(chart.mode(), PlaybackMode::Playing);
    assert_eq!(chart.current_frame(), 0);
    assert_eq!(chart.progress(), 0.0);
    let frame = chart.renderer().last_frame().expect("frame");
    assert_eq!(frame.frame_index, 0);
}

#[test]
fn reset_rewinds_renders_once_and_plays() {
    let (mut chart, driver) = chart(3);
    chart.play().expect("play");
    pump(&mut chart, &driver, 500);
    let stale = driver.pending_tokens()[0];
    let rendered = chart.renderer().frame_count();

    chart.reset().expect("reset");
    assert_eq!(chart.mode(), PlaybackMode::Playing);
    assert_eq!(chart.current_frame(), 0);
    assert_eq!(chart.renderer().frame_count(), rendered + 1);
    assert_eq!(driver.pending_count(), 1);
    assert_eq!(chart.on_tick(stale).expect("stale"), TickOutcome::Stale);
}

#[test]
fn single_frame_timeline_finishes_immediately() {
    let (mut chart, driver) = chart(1);
    chart.play().expect("play");
    assert_eq!(chart.mode(), PlaybackMode::Finished);
    assert_eq!(chart.current_frame(), 0);
    assert_eq!(driver.pending_count(), 0);
    assert_eq!(chart.renderer().frame_count(), 1);
}

#[test]
fn resize_rerenders_without_touching_playback() {
    let (mut chart, _driver) = chart(3);
    chart.seek(1).expect("seek");
    chart.end_drag().expect("end drag");

    chart.resize(Viewport::new(640, 480)).expect("resize");
    assert_eq!(chart.mode(), PlaybackMode::Paused);
    assert_eq!(chart.current_frame(), 1);
    let frame = chart.renderer().last_frame().expect("frame");
    assert_eq!(frame.viewport, Viewport::new(640, 480));
    assert_eq!(frame.frame_index, 1);

    let err = chart.resize(Viewport::new(0, 480)).expect_err("zero width");
    assert!(matches!(err, RaceError::InvalidViewport { width: 0, height: 480 }));
    assert_eq!(chart.viewport(), Viewport::new(640, 480));
}

#[test]
fn keep_zero_toggle_restores_appeared_labels() {
    let timeline =
        Timeline::new(vec!["2020-01".to_owned(), "2020-02".to_owned()]).expect("timeline");
    let store = SeriesStore::new(
        timeline,
        vec![
            SeriesInput::new("Alpha", "#1428A0", vec![0.0, 10.0]),
            SeriesInput::new("Beta", "#C7000B", vec![5.0, 5.0]),
        ],
    )
    .expect("store");
    let (mut chart, _driver) =
        RaceChart::with_manual_driver(RecordingRenderer::default(), store, config())
            .expect("chart");

    chart.seek(1).expect("seek 1");
    chart.seek(0).expect("seek 0");
    let labels: Vec<&str> = chart.visible_items().iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Beta"]);

    chart.toggle_keep_zero_items().expect("toggle");
    assert!(chart.keep_zero_items());
    assert_eq!(chart.mode(), PlaybackMode::Dragging);
    let labels: Vec<&str> = chart.visible_items().iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Beta", "Alpha"]);

    chart.set_keep_zero_items(false).expect("disable");
    assert_eq!(chart.visible_items().len(), 1);
    assert!(chart.appeared().contains("Alpha"));
}

#[test]
fn elapsed_time_tracks_progress() {
    let (mut chart, _driver) = chart(3);
    chart.seek(1).expect("seek");
    assert_eq!(chart.elapsed_ms(), 500.0);
    assert_eq!(chart.start_label(), "2020-01");
    assert_eq!(chart.end_label(), "2020-03");
    assert_eq!(chart.current_label(), "2020-02");
}
