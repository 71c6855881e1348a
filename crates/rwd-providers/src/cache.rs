// ABOUTME: On-disk JSON cache of activity detail payloads keyed by activity id
// ABOUTME: CachingActivitySource reads through the cache before delegating to the wrapped source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rwd_core::constants::cache::{CACHE_DIR_NAME, DETAILS_DIR_NAME};
use rwd_core::errors::{AppError, AppResult};
use rwd_core::models::{RawActivityDetail, RawActivitySummary};
use tokio::fs;
use tracing::{debug, warn};

use crate::source::{validate_activity_id, ActivitySource};

/// Detail payload cache with one `<activity_id>.json` file per activity
///
/// Cached payloads never expire: a recorded activity does not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCache {
    dir: PathBuf,
}

impl DetailCache {
    /// Cache rooted at `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache under the user cache directory (`~/.cache/garmin_activities/details` on Linux)
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the platform has no user cache directory.
    pub fn in_user_cache_dir() -> AppResult<Self> {
        Ok(Self::new(Self::default_dir()?))
    }

    /// Default cache directory
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the platform has no user cache directory.
    pub fn default_dir() -> AppResult<PathBuf> {
        dirs::cache_dir()
            .map(|base| base.join(CACHE_DIR_NAME).join(DETAILS_DIR_NAME))
            .ok_or_else(|| AppError::config("no user cache directory available"))
    }

    /// Directory holding the cached payloads
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path of one cached payload
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the id contains anything but ASCII letters,
    /// digits, `-` and `_`.
    pub fn path_for(&self, activity_id: &str) -> AppResult<PathBuf> {
        validate_activity_id(activity_id)?;
        Ok(self.dir.join(format!("{activity_id}.json")))
    }

    /// Read a cached payload
    ///
    /// A missing file is a miss. An unreadable or corrupt entry is logged and
    /// also treated as a miss so it gets refetched.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an invalid activity id.
    pub async fn get(&self, activity_id: &str) -> AppResult<Option<RawActivityDetail>> {
        let path = self.path_for(activity_id)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Failed to read cached detail");
                return Ok(None);
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(detail) => {
                debug!(activity.id = activity_id, "Detail cache hit");
                Ok(Some(detail))
            }
            Err(error) => {
                warn!(path = %path.display(), error = %error, "Ignoring corrupt cached detail");
                Ok(None)
            }
        }
    }

    /// Store a payload, creating the cache directory if needed
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory or file cannot be written,
    /// or a serialization error if the payload cannot be encoded.
    pub async fn put(&self, activity_id: &str, detail: &RawActivityDetail) -> AppResult<()> {
        let path = self.path_for(activity_id)?;
        let json = serde_json::to_vec(detail)?;
        fs::create_dir_all(&self.dir).await?;
        fs::write(&path, json).await?;
        debug!(activity.id = activity_id, path = %path.display(), "Cached activity detail");
        Ok(())
    }
}

/// Activity source that serves detail payloads from a [`DetailCache`] when present
pub struct CachingActivitySource<S> {
    inner: S,
    cache: DetailCache,
}

impl<S: ActivitySource> CachingActivitySource<S> {
    /// Wrap `inner` with `cache`
    #[must_use]
    pub const fn new(inner: S, cache: DetailCache) -> Self {
        Self { inner, cache }
    }

    /// The wrapped source
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// The detail cache
    #[must_use]
    pub const fn cache(&self) -> &DetailCache {
        &self.cache
    }
}

#[async_trait]
impl<S: ActivitySource> ActivitySource for CachingActivitySource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn fetch_activities(
        &self,
        start: usize,
        limit: usize,
    ) -> AppResult<Vec<RawActivitySummary>> {
        self.inner.fetch_activities(start, limit).await
    }

    async fn fetch_activity_details(&self, activity_id: &str) -> AppResult<RawActivityDetail> {
        if let Some(detail) = self.cache.get(activity_id).await? {
            return Ok(detail);
        }

        let detail = self.inner.fetch_activity_details(activity_id).await?;
        if let Err(error) = self.cache.put(activity_id, &detail).await {
            warn!(activity.id = activity_id, error = %error, "Failed to cache activity detail");
        }
        Ok(detail)
    }
}
