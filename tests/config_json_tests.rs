use race_chart::RaceError;
use race_chart::api::{
    RACE_SNAPSHOT_JSON_SCHEMA_V1, RaceChart, RaceChartConfig, RaceSnapshot,
};
use race_chart::core::{DataFeed, LayoutTuning, SeriesInput, Viewport};
use race_chart::playback::{ManualScheduler, PlaybackMode};
use race_chart::render::NullRenderer;

#[test]
fn empty_json_object_yields_documented_defaults() {
    let config = RaceChartConfig::from_json_str("{}").expect("config");
    assert_eq!(config, RaceChartConfig::default());
    assert_eq!(config.viewport, Viewport::new(1000, 600));
    assert_eq!(config.max_visible_items, 12);
    assert!(!config.keep_zero_items);
    assert!(!config.prescan_appeared);
    assert_eq!(config.total_playback_duration_ms, 20_000);
    assert_eq!(config.tick_interval_ms, 100);
    assert_eq!(config.layout, LayoutTuning::default());
}

#[test]
fn partial_json_overrides_only_named_fields() {
    let json = r#"{
        "max_visible_items": 5,
        "keep_zero_items": true,
        "layout": { "bar_padding_px": 8.0 }
    }"#;
    let config = RaceChartConfig::from_json_str(json).expect("config");
    assert_eq!(config.max_visible_items, 5);
    assert!(config.keep_zero_items);
    assert_eq!(config.layout.bar_padding_px, 8.0);
    assert_eq!(config.layout.max_bar_height_px, 30.0);

    let round_trip =
        RaceChartConfig::from_json_str(&config.to_json_pretty().expect("json")).expect("parse");
    assert_eq!(round_trip, config);
}

#[test]
fn out_of_range_config_is_rejected() {
    for config in [
        RaceChartConfig::default().with_max_visible_items(0),
        RaceChartConfig::default().with_total_playback_duration_ms(0),
        RaceChartConfig::default().with_tick_interval_ms(5),
    ] {
        assert!(matches!(config.validate(), Err(RaceError::InvalidConfig(_))));
    }
    let zero_viewport = RaceChartConfig::new(Viewport::new(0, 10));
    assert!(matches!(
        zero_viewport.validate(),
        Err(RaceError::InvalidViewport { .. })
    ));
}

#[test]
fn chart_construction_validates_config() {
    let feed = DataFeed::new(
        vec!["a".to_owned()],
        vec![SeriesInput::new("Alpha", "#000000", vec![1.0])],
    );
    let driver = ManualScheduler::new();
    let result = RaceChart::from_feed(
        NullRenderer::default(),
        feed,
        RaceChartConfig::default().with_tick_interval_ms(1),
        driver.clone(),
        driver,
    );
    assert!(matches!(result, Err(RaceError::InvalidConfig(_))));
}

#[test]
fn feed_titles_fill_unset_config_titles() {
    let mut feed = DataFeed::new(
        vec!["a".to_owned(), "b".to_owned()],
        vec![SeriesInput::new("Alpha", "#000000", vec![1.0, 2.0])],
    );
    feed.time_axis_title = Some("Quarter".to_owned());
    feed.value_axis_title = Some("Units".to_owned());
    let driver = ManualScheduler::new();
    let chart = RaceChart::from_feed(
        NullRenderer::default(),
        feed,
        RaceChartConfig::default().with_value_axis_title("Millions"),
        driver.clone(),
        driver,
    )
    .expect("chart");

    assert_eq!(chart.config().title.as_deref(), Some("Quarter"));
    assert_eq!(chart.config().value_axis_title.as_deref(), Some("Millions"));
}

#[test]
fn prescan_config_seeds_appeared_set() {
    let feed = DataFeed::new(
        vec!["a".to_owned(), "b".to_owned()],
        vec![
            SeriesInput::new("Alpha", "#000000", vec![0.0, 3.0]),
            SeriesInput::new("Beta", "#ffffff", vec![1.0, 1.0]),
        ],
    );
    let driver = ManualScheduler::new();
    let mut chart = RaceChart::from_feed(
        NullRenderer::default(),
        feed,
        RaceChartConfig::default()
            .with_keep_zero_items(true)
            .with_prescan_appeared(true),
        driver.clone(),
        driver,
    )
    .expect("chart");

    assert!(chart.appeared().contains("Alpha"));
    chart.render().expect("render");
    assert_eq!(chart.visible_items().len(), 2);
}

#[test]
fn snapshot_contract_round_trips() {
    let feed = DataFeed::new(
        vec!["2020".to_owned(), "2021".to_owned()],
        vec![
            SeriesInput::new("Alpha", "#1428A0", vec![1.0, 4.0]),
            SeriesInput::new("Beta", "#C7000B", vec![2.0, 3.0]),
        ],
    );
    let driver = ManualScheduler::new();
    let mut chart = RaceChart::from_feed(
        NullRenderer::default(),
        feed,
        RaceChartConfig::default(),
        driver.clone(),
        driver,
    )
    .expect("chart");
    chart.seek(1).expect("seek");

    let snapshot = chart.snapshot();
    assert_eq!(snapshot.mode, PlaybackMode::Dragging);
    assert_eq!(snapshot.current_label, "2021");
    assert_eq!(snapshot.appeared, vec!["Alpha", "Beta"]);
    assert_eq!(snapshot.visible_items[0].label, "Alpha");

    let json = chart.snapshot_json_contract_v1_pretty().expect("json");
    assert!(json.contains(&format!("\"schema_version\": {RACE_SNAPSHOT_JSON_SCHEMA_V1}")));
    let parsed = RaceSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(parsed, snapshot);

    let bare = serde_json::to_string(&snapshot).expect("bare json");
    assert_eq!(RaceSnapshot::from_json_compat_str(&bare).expect("parse bare"), snapshot);

    let unsupported = json.replace(
        &format!("\"schema_version\": {RACE_SNAPSHOT_JSON_SCHEMA_V1}"),
        "\"schema_version\": 99",
    );
    assert!(RaceSnapshot::from_json_compat_str(&unsupported).is_err());
}
