// ABOUTME: Output formatting helpers for rwd-cli
// ABOUTME: Provides consistent display of providers, runs, activity details and tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use run_with_data::constants::metric_names::SPEED;
use run_with_data::intelligence::{DistanceUnit, Pace, PowerSources};
use run_with_data::models::{Activity, Metric, MetricKey, MetricSlot, TimeTable};
use run_with_data::providers::ProviderDefinition;

use crate::OutputFormat;

/// Display one provider and optionally its fields
pub fn display_provider(provider: &ProviderDefinition, with_fields: bool) {
    println!("{}", provider.name());
    println!("   Author: {}", provider.author());
    println!("   App ID: {}", provider.app_id());
    if !provider.is_native() {
        println!("   Store:  {}", provider.app_url());
    }
    println!("   Fields: {}", provider.len());

    if with_fields {
        for metric in provider.metrics() {
            println!(
                "     {:<12} {:<32} {}",
                key_label(metric.key()),
                metric.name(),
                metric.unit()
            );
        }
    }
    println!();
}

/// Display a run listing
pub fn display_run_list(runs: &[Activity]) {
    if runs.is_empty() {
        println!("No runs found.");
        return;
    }

    println!("\n{:<14} {:<20} {:<8} {:<9} Name", "ID", "Start", "TZ", "Treadmill");
    println!("{}", "=".repeat(80));
    for run in runs {
        println!(
            "{:<14} {:<20} {:<8} {:<9} {}",
            run.activity_id(),
            run.start_time().format("%Y-%m-%d %H:%M:%S").to_string(),
            run.timezone(),
            if run.is_treadmill() { "yes" } else { "no" },
            run.activity_name().unwrap_or("-")
        );
    }
    println!("\n{} run(s)", runs.len());
}

/// Display a loaded activity with its metric slots and power sources
pub fn display_activity(activity: &Activity, power: &PowerSources) {
    println!("\nActivity {}", activity.activity_id());
    println!("{}", "=".repeat(80));
    println!("   Name:      {}", activity.activity_name().unwrap_or("-"));
    println!("   Start:     {} ({})", activity.start_time(), activity.timezone());
    if let Some(calories) = activity.calories() {
        println!("   Calories:  {calories:.0}");
    }
    println!("   Treadmill: {}", activity.is_treadmill());
    println!("   Link:      {}", activity.url());

    if let Some(pace) = average_pace(activity) {
        println!("   Avg pace:  {pace}");
    }

    println!("\nMetrics:");
    for (position, slot) in activity.metrics().unwrap_or_default().iter().enumerate() {
        match slot {
            MetricSlot::Resolved(metric) => println!(
                "   [{position:>2}] {:<40} {:<10} {} samples",
                metric.display_name(),
                metric.unit(),
                metric.value().map_or(0, <[f64]>::len)
            ),
            MetricSlot::Unresolved { key, app_id } => println!(
                "   [{position:>2}] unresolved {key}{}",
                app_id
                    .as_deref()
                    .map(|app_id| format!(" (app {app_id})"))
                    .unwrap_or_default()
            ),
        }
    }

    println!("\nPower sources:");
    let mut any = false;
    for (source, position) in power.available() {
        any = true;
        println!("   {:<14} metric [{position}]", source.label());
    }
    if !any {
        println!("   none");
    }
}

/// Print one table in the requested format
pub fn print_table(table: &TimeTable, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => print!("{}", table.to_csv()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(table)?),
    }
    Ok(())
}

/// Print several tables, blank-line separated for CSV and as one array for JSON
pub fn print_tables(tables: &[TimeTable], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            for (position, table) in tables.iter().enumerate() {
                if position > 0 {
                    println!();
                }
                print!("{}", table.to_csv());
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(tables)?),
    }
    Ok(())
}

fn key_label(key: &MetricKey) -> String {
    match key {
        MetricKey::Native(key) => key.clone(),
        MetricKey::Developer(number) => format!("field #{number}"),
    }
}

fn average_pace(activity: &Activity) -> Option<Pace> {
    let speeds = activity.find_metric(SPEED).and_then(Metric::value)?;
    let moving: Vec<f64> = speeds
        .iter()
        .copied()
        .filter(|speed| speed.is_finite() && *speed > 0.0)
        .collect();
    if moving.is_empty() {
        return None;
    }
    Pace::from_mps(
        moving.iter().sum::<f64>() / moving.len() as f64,
        DistanceUnit::Km,
    )
}
