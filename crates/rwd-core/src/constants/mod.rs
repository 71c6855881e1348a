// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Provider app ids, field keys, activity type keys and resampling defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! flat namespace.

/// Data provider identities (app ids, names, authors)
pub mod providers {
    use uuid::Uuid;

    /// App id reserved for fields emitted by the device itself
    pub const GARMIN_NATIVE_APP_ID: Uuid = Uuid::nil();
    /// Display name of the native field catalog
    pub const GARMIN_NATIVE_NAME: &str = "Default Garmin Field";
    /// Author of the native field catalog
    pub const GARMIN_AUTHOR: &str = "Garmin";
    /// App name stamped on native metrics
    pub const NATIVE_APP_NAME: &str = "Garmin";

    /// Stryd Connect IQ app id
    pub const STRYD_ZONES_APP_ID: Uuid = Uuid::from_u128(0x18fb_2cf0_1a4b_430d_ad66_988c_8474_21f4);
    /// Stryd Connect IQ app name
    pub const STRYD_ZONES_NAME: &str = "StrydZones - Running Power Zones";
    /// Stryd Connect IQ app author
    pub const STRYD_ZONES_AUTHOR: &str = "StrydTeam";

    /// RunPowerModel Connect IQ app id
    pub const RUN_POWER_MODEL_APP_ID: Uuid = Uuid::from_u128(0x6ac3_9398_29fa_4183_a9ac_8396_ce94_1446);
    /// RunPowerModel Connect IQ app name
    pub const RUN_POWER_MODEL_NAME: &str = "RunPowerModel - Wrist-Based Running Power Meter";
    /// RunPowerModel Connect IQ app author
    pub const RUN_POWER_MODEL_AUTHOR: &str = "MarkusHoller";

    /// Connect IQ store page prefix
    pub const APP_STORE_URL: &str = "https://apps.garmin.com/apps";
    /// Activity page prefix on Garmin Connect
    pub const ACTIVITY_URL: &str = "https://connect.garmin.com/modern/activity";
}

/// Raw field descriptor keys
pub mod fields {
    /// Substring marking a descriptor as a Connect IQ developer field
    pub const IQ_DEVELOPER_MARKER: &str = "IQDeveloper";
    /// Native key of the timestamp channel (epoch milliseconds)
    pub const TIMESTAMP_KEY: &str = "directTimestamp";
    /// Native key of the speed channel
    pub const SPEED_KEY: &str = "directSpeed";
    /// Native key of the latitude channel
    pub const LATITUDE_KEY: &str = "directLatitude";
    /// Native key of the longitude channel
    pub const LONGITUDE_KEY: &str = "directLongitude";
}

/// Metric display names used by the table builder and analysis helpers
pub mod metric_names {
    /// Timestamp metric, becomes the table index
    pub const TIMESTAMP: &str = "Timestamp";
    /// Speed metric, drives stop segmentation
    pub const SPEED: &str = "Speed";
    /// Power metric exposed by several providers
    pub const POWER: &str = "Power";
    /// Power metric name used by RunPowerModel
    pub const RUNNING_POWER: &str = "Running Power";
    /// Latitude metric
    pub const LATITUDE: &str = "Latitude";
    /// Longitude metric
    pub const LONGITUDE: &str = "Longitude";
}

/// Activity type keys from the activity summary
pub mod activity_types {
    /// Outdoor running
    pub const RUNNING: &str = "running";
    /// Treadmill running
    pub const TREADMILL_RUNNING: &str = "treadmill_running";
    /// Types kept by the running activity listing
    pub const RUN_TYPES: [&str; 2] = [RUNNING, TREADMILL_RUNNING];
}

/// Resampling defaults
pub mod resample {
    /// Default grid step in seconds
    pub const DEFAULT_STEP_SECS: i64 = 1;
    /// Default break threshold in seconds
    pub const DEFAULT_BREAK_THRESHOLD_SECS: i64 = 10;
    /// Upper bound on output rows of one resampled table
    pub const MAX_GRID_ROWS: i64 = 2_000_000;
}

/// Paging and batching limits for external collaborators
pub mod limits {
    /// Default activity page size
    pub const DEFAULT_PAGE_SIZE: usize = 20;
    /// Maximum coordinates per elevation lookup request
    pub const MAX_ELEVATION_BATCH: usize = 500;
}

/// Cache layout
pub mod cache {
    /// Directory name under the user cache dir
    pub const CACHE_DIR_NAME: &str = "garmin_activities";
    /// Sub-directory holding one JSON file per activity detail payload
    pub const DETAILS_DIR_NAME: &str = "details";
}

/// Service identity used in logs
pub mod service_names {
    /// Name of this service in structured logs
    pub const RUN_WITH_DATA: &str = "run_with_data";
}
