//! Release-hosting API abstraction layer
//!
//! This module provides a trait-based abstraction over the GitHub release
//! API, allowing for multiple implementations including the real HTTP
//! client and a mock implementation for testing.
//!
//! The primary abstraction is the [ReleaseHost] trait, which defines the
//! four remote operations release-bump needs. The concrete implementations
//! include:
//!
//! - [client::GitHubClient]: A real implementation using `reqwest`
//! - [mock::MockHost]: A mock implementation for testing
//!
//! Most code should depend on the [ReleaseHost] trait rather than concrete
//! implementations to enable easy testing.

pub mod client;
pub mod mock;

pub use client::GitHubClient;
pub use mock::MockHost;

use serde::Deserialize;

use crate::error::Result;

/// A release as reported by the hosting API.
///
/// Fetched-then-discarded state: release-bump never persists these locally.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    /// Opaque release id
    pub id: u64,
    /// Tag the release is published under, expected to parse as a version
    pub tag_name: String,
    /// Display name shown alongside the tag
    #[serde(default)]
    pub name: Option<String>,
    /// Commit identifier the release is anchored to
    pub target_commitish: String,
}

/// Remote operations against the release-hosting API.
///
/// All methods are single network round trips with no retry logic; failures
/// surface immediately as [crate::error::ReleaseBumpError] values.
#[allow(async_fn_in_trait)]
pub trait ReleaseHost {
    /// Fetch the most recent release, or `None` when the repository has no
    /// releases yet.
    async fn latest_release(&self) -> Result<Option<Release>>;

    /// Re-tag and rename an existing release in place.
    async fn update_release(&self, release_id: u64, tag_name: &str, name: &str) -> Result<()>;

    /// Create a new release anchored at `target_commitish`.
    async fn create_release(
        &self,
        tag_name: &str,
        name: &str,
        target_commitish: &str,
    ) -> Result<Release>;

    /// Attach an artifact to a release under the given file name.
    async fn upload_asset(&self, release_id: u64, file_name: &str, bytes: Vec<u8>) -> Result<()>;
}
