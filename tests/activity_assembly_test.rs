// ABOUTME: Integration tests for assembling activities from raw detail payloads
// ABOUTME: Validates registry resolution, unresolved slots, table building and power-source lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{TimeDelta, TimeZone, Utc};
use common::{millis, power_detail, stryd, summary, IQ_KEY, UNKNOWN_APP_ID};
use run_with_data::errors::TelemetryError;
use run_with_data::intelligence::{PowerSource, PowerSources};
use run_with_data::models::{Activity, MetricDescriptor, MetricSlot, RawActivityDetail};
use run_with_data::providers::{activity_coordinates, global_registry};
use serde_json::json;

fn activity() -> Activity {
    Activity::from_raw_activity(&summary("1001", "running")).unwrap()
}

#[test]
fn test_speed_and_form_power_matrix() {
    let detail = RawActivityDetail::new(
        vec![MetricDescriptor::native("directSpeed"), stryd(8)],
        vec![vec![json!(3.1), json!(250)], vec![json!(3.2), json!(260)]],
    );
    let mut activity = activity();
    activity
        .load_details(&detail, global_registry().as_ref())
        .unwrap();

    let slots = activity.metrics().unwrap();
    assert_eq!(slots.len(), 2);

    let speed = slots[0].as_metric().unwrap();
    assert_eq!(speed.name(), "Speed");
    assert_eq!(speed.value().unwrap(), [3.1, 3.2].as_slice());

    let form_power = slots[1].as_metric().unwrap();
    assert_eq!(form_power.name(), "Form Power");
    assert_eq!(form_power.app_name(), "StrydZones - Running Power Zones");
    assert_eq!(form_power.value().unwrap(), [250.0, 260.0].as_slice());
}

#[test]
fn test_unknown_app_leaves_unresolved_slot() {
    let detail = RawActivityDetail::new(
        vec![
            MetricDescriptor::native("directSpeed"),
            MetricDescriptor::developer(IQ_KEY, UNKNOWN_APP_ID, 8),
            MetricDescriptor::native("directSomethingNew"),
        ],
        vec![vec![json!(3.0), json!(1), json!(2)]],
    );
    let mut activity = activity();
    activity
        .load_details(&detail, global_registry().as_ref())
        .unwrap();

    let slots = activity.metrics().unwrap();
    assert_eq!(slots.len(), 3);
    assert!(slots[0].is_resolved());
    assert_eq!(
        slots[1],
        MetricSlot::Unresolved {
            key: IQ_KEY.to_owned(),
            app_id: Some(UNKNOWN_APP_ID.to_owned()),
        }
    );
    assert!(!slots[2].is_resolved());
    assert_eq!(activity.resolved_metrics().count(), 1);
}

#[test]
fn test_ragged_rows_leave_activity_untouched() {
    let detail = RawActivityDetail::new(
        vec![MetricDescriptor::native("directSpeed"), stryd(8)],
        vec![vec![json!(3.1), json!(250)], vec![json!(3.2)]],
    );
    let mut activity = activity();
    let result = activity.load_details(&detail, global_registry().as_ref());
    assert!(matches!(result, Err(TelemetryError::Lookup(_))));
    assert!(!activity.is_loaded());
}

#[test]
fn test_nulls_become_nan_and_text_is_dropped() {
    let detail = RawActivityDetail::new(
        vec![
            MetricDescriptor::native("directHeartRate"),
            MetricDescriptor::native("directSpeed"),
        ],
        vec![
            vec![json!(150), json!("fast")],
            vec![json!(null), json!(3.0)],
        ],
    );
    let mut activity = activity();
    activity
        .load_details(&detail, global_registry().as_ref())
        .unwrap();

    let heart_rate = activity.find_metric("heart rate").unwrap().value().unwrap();
    assert!((heart_rate[0] - 150.0).abs() < f64::EPSILON);
    assert!(heart_rate[1].is_nan());

    assert!(!activity.metrics().unwrap()[1].is_resolved());
    assert!(activity.find_metric("Speed").is_none());
}

#[test]
fn test_position_wins_over_metrics_index() {
    let mut speed = MetricDescriptor::native("directSpeed");
    speed.metrics_index = Some(1);
    let mut heart_rate = MetricDescriptor::native("directHeartRate");
    heart_rate.metrics_index = Some(0);

    let detail = RawActivityDetail::new(vec![speed, heart_rate], vec![vec![json!(3.0), json!(140)]]);
    let mut activity = activity();
    activity
        .load_details(&detail, global_registry().as_ref())
        .unwrap();

    assert_eq!(activity.metric_index("Speed"), Some(0));
    assert_eq!(
        activity.find_metric("Speed").unwrap().value().unwrap(),
        [3.0].as_slice()
    );
}

#[test]
fn test_table_suffixes_duplicate_names() {
    let mut activity = activity();
    activity
        .load_details(&power_detail(&[0, 1, 2]), global_registry().as_ref())
        .unwrap();

    let table = activity.to_table().unwrap();
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec![
            "Speed",
            "Power - Garmin",
            "Power - StrydZones - Running Power Zones",
            "Running Power",
        ]
    );
    assert_eq!(table.len(), 3);

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    assert_eq!(table.index()[0], start);
    assert_eq!(table.index()[2], start + TimeDelta::seconds(2));
    assert_eq!(
        table.column("Running Power").unwrap(),
        [270.0, 271.0, 272.0].as_slice()
    );
}

#[test]
fn test_table_keeps_repeated_descriptor() {
    let detail = RawActivityDetail::new(
        vec![
            MetricDescriptor::native("directTimestamp"),
            MetricDescriptor::native("directSpeed"),
            MetricDescriptor::native("directSpeed"),
        ],
        vec![
            vec![millis(0), json!(3.0), json!(3.5)],
            vec![millis(1), json!(3.1), json!(3.6)],
        ],
    );
    let mut activity = activity();
    activity
        .load_details(&detail, global_registry().as_ref())
        .unwrap();

    let table = activity.to_table().unwrap();
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["Speed - Garmin", "Speed - Garmin #2"]
    );
    assert_eq!(table.column("Speed - Garmin").unwrap(), [3.0, 3.1].as_slice());
    assert_eq!(
        table.column("Speed - Garmin #2").unwrap(),
        [3.5, 3.6].as_slice()
    );
}

#[test]
fn test_table_requires_timestamp() {
    let detail = RawActivityDetail::new(
        vec![MetricDescriptor::native("directSpeed")],
        vec![vec![json!(3.0)]],
    );
    let mut activity = activity();
    activity
        .load_details(&detail, global_registry().as_ref())
        .unwrap();
    assert!(matches!(activity.to_table(), Err(TelemetryError::Lookup(_))));
}

#[test]
fn test_table_rejects_unordered_timestamps() {
    let detail = RawActivityDetail::new(
        vec![MetricDescriptor::native("directTimestamp")],
        vec![vec![millis(5)], vec![millis(5)]],
    );
    let mut activity = activity();
    activity
        .load_details(&detail, global_registry().as_ref())
        .unwrap();
    assert!(matches!(
        activity.to_table(),
        Err(TelemetryError::Validation(_))
    ));
}

#[test]
fn test_power_sources_positions() {
    let mut activity = activity();
    assert_eq!(PowerSources::locate(&activity), PowerSources::default());

    activity
        .load_details(&power_detail(&[0, 1]), global_registry().as_ref())
        .unwrap();
    let sources = PowerSources::locate(&activity);

    assert_eq!(sources.timestamp, Some(0));
    assert_eq!(sources.get(PowerSource::Garmin), Some(2));
    assert_eq!(sources.get(PowerSource::Stryd), Some(3));
    assert_eq!(sources.get(PowerSource::RunPowerModel), Some(4));
    assert_eq!(sources.available().count(), 3);
}

#[test]
fn test_coordinates_skip_missing_fixes() {
    let detail = RawActivityDetail::new(
        vec![
            MetricDescriptor::native("directLatitude"),
            MetricDescriptor::native("directLongitude"),
        ],
        vec![
            vec![json!(46.2), json!(6.1)],
            vec![json!(null), json!(6.2)],
            vec![json!(46.3), json!(6.3)],
        ],
    );
    let mut activity = activity();
    activity
        .load_details(&detail, global_registry().as_ref())
        .unwrap();
    assert_eq!(
        activity_coordinates(&activity).unwrap(),
        vec![(46.2, 6.1), (46.3, 6.3)]
    );

    let mut no_gps = Activity::from_raw_activity(&summary("1002", "treadmill_running")).unwrap();
    no_gps
        .load_details(&power_detail(&[0]), global_registry().as_ref())
        .unwrap();
    assert!(matches!(
        activity_coordinates(&no_gps),
        Err(TelemetryError::Lookup(_))
    ));
}
