use std::sync::Mutex;

use crate::error::{ReleaseBumpError, Result};
use crate::github::{Release, ReleaseHost};

/// Release id handed out by [MockHost::create_release].
pub const MOCK_CREATED_RELEASE_ID: u64 = 9001;

/// One recorded mutation against the mock host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    UpdateRelease {
        release_id: u64,
        tag_name: String,
        name: String,
    },
    CreateRelease {
        tag_name: String,
        name: String,
        target_commitish: String,
    },
    UploadAsset {
        release_id: u64,
        file_name: String,
        size: usize,
    },
}

/// Mock release host for testing without network access.
///
/// Serves a configurable "latest release" and records every mutation in
/// order, so tests can assert on the exact remote call sequence.
pub struct MockHost {
    latest: Option<Release>,
    fail_latest: bool,
    calls: Mutex<Vec<HostCall>>,
}

impl MockHost {
    /// Create a mock host with no releases
    pub fn new() -> Self {
        MockHost {
            latest: None,
            fail_latest: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock host whose latest release is `release`
    pub fn with_latest_release(release: Release) -> Self {
        MockHost {
            latest: Some(release),
            fail_latest: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock host whose latest-release lookup fails
    pub fn failing_latest() -> Self {
        MockHost {
            latest: None,
            fail_latest: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// All mutations recorded so far, in call order
    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseHost for MockHost {
    async fn latest_release(&self) -> Result<Option<Release>> {
        if self.fail_latest {
            return Err(ReleaseBumpError::api("latest release lookup failed"));
        }
        Ok(self.latest.clone())
    }

    async fn update_release(&self, release_id: u64, tag_name: &str, name: &str) -> Result<()> {
        self.record(HostCall::UpdateRelease {
            release_id,
            tag_name: tag_name.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }

    async fn create_release(
        &self,
        tag_name: &str,
        name: &str,
        target_commitish: &str,
    ) -> Result<Release> {
        self.record(HostCall::CreateRelease {
            tag_name: tag_name.to_string(),
            name: name.to_string(),
            target_commitish: target_commitish.to_string(),
        });
        Ok(Release {
            id: MOCK_CREATED_RELEASE_ID,
            tag_name: tag_name.to_string(),
            name: Some(name.to_string()),
            target_commitish: target_commitish.to_string(),
        })
    }

    async fn upload_asset(&self, release_id: u64, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        self.record(HostCall::UploadAsset {
            release_id,
            file_name: file_name.to_string(),
            size: bytes.len(),
        });
        Ok(())
    }
}
