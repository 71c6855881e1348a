// ABOUTME: Offline activity source backed by a directory of exported JSON payloads
// ABOUTME: Reads activities.json for summaries and details/<id>.json for detail payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rwd_core::constants::cache::DETAILS_DIR_NAME;
use rwd_core::errors::{AppError, AppResult};
use rwd_core::models::{RawActivityDetail, RawActivitySummary};
use tokio::fs;

use crate::source::{validate_activity_id, ActivitySource};

/// Summary listing file name inside an archive
pub const ACTIVITIES_FILE: &str = "activities.json";

/// Activity source reading an exported archive
///
/// Layout:
///
/// ```text
/// <root>/activities.json        array of activity summaries, newest first
/// <root>/details/<id>.json      one detail payload per activity
/// ```
#[derive(Debug, Clone)]
pub struct LocalArchiveSource {
    root: PathBuf,
}

impl LocalArchiveSource {
    /// Archive rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Archive root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read_file(path: &Path, what: &str) -> AppResult<Vec<u8>> {
        fs::read(path).await.map_err(|error| {
            if error.kind() == ErrorKind::NotFound {
                AppError::not_found(format!("{what} ({})", path.display()))
            } else {
                AppError::from(error)
            }
        })
    }
}

#[async_trait]
impl ActivitySource for LocalArchiveSource {
    fn name(&self) -> &str {
        "local-archive"
    }

    async fn fetch_activities(
        &self,
        start: usize,
        limit: usize,
    ) -> AppResult<Vec<RawActivitySummary>> {
        let bytes = Self::read_file(&self.root.join(ACTIVITIES_FILE), "activity listing").await?;
        let summaries: Vec<RawActivitySummary> = serde_json::from_slice(&bytes)?;
        Ok(summaries.into_iter().skip(start).take(limit).collect())
    }

    async fn fetch_activity_details(&self, activity_id: &str) -> AppResult<RawActivityDetail> {
        validate_activity_id(activity_id)?;
        let path = self
            .root
            .join(DETAILS_DIR_NAME)
            .join(format!("{activity_id}.json"));
        let bytes = Self::read_file(&path, &format!("activity {activity_id}")).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
