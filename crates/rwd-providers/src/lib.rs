// ABOUTME: Metric provider catalogs, the metric registry, and activity source plumbing
// ABOUTME: Activity paging stream, detail cache, local archive source and elevation batching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Metric providers and activity sources.
//!
//! A provider is a catalog of metrics emitted by one data source: the device
//! itself or a Connect IQ app identified by its app id. The [`MetricRegistry`]
//! dispatches raw field descriptors to the right catalog. The rest of the crate
//! models the external collaborators (activity listing, detail fetch, elevation
//! lookup) as traits and provides the glue around them.

// Re-export rwd-core modules for convenience
pub use rwd_core::constants;
pub use rwd_core::errors;
pub use rwd_core::models;

/// Streaming run iterator over paginated activity sources
pub mod activity_iterator;
/// On-disk detail cache and read-through source wrapper
pub mod cache;
/// Provider catalog type
pub mod catalog;
/// Built-in provider catalogs
pub mod catalogs;
/// Batched elevation lookups
pub mod elevation;
/// Directory-backed activity source
pub mod local;
/// Metric registry and global instance
pub mod registry;
/// Collaborator traits
pub mod source;

pub use activity_iterator::{
    collect_runs, run_activity_stream, RunStream, RunStreamExt, StreamConfig, MAX_PAGE_SIZE,
    MIN_PAGE_SIZE,
};
pub use cache::{CachingActivitySource, DetailCache};
pub use catalog::ProviderDefinition;
pub use elevation::{activity_coordinates, lookup_elevations};
pub use local::{LocalArchiveSource, ACTIVITIES_FILE};
pub use registry::{global_registry, MetricRegistry};
pub use source::{ActivitySource, ElevationLookup};
