//! The one-shot release workflow: resolve, bump, then update or create.

use crate::config::Inputs;
use crate::error::{ReleaseBumpError, Result};
use crate::github::ReleaseHost;
use crate::resolver::{self, ResolvedRelease};
use crate::ui;
use crate::version::Version;

/// Which remote mutation path a run took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishAction {
    /// The latest release already sat on the current commit and was
    /// re-tagged in place. No asset upload happens on this path.
    Updated { release_id: u64 },
    /// A new release was created and the artifact attached to it.
    Created { release_id: u64, asset: String },
}

/// Result of a successful publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// Version the bump started from (latest release or base fallback)
    pub previous: Version,
    /// Version the release was published under
    pub version: Version,
    pub action: PublishAction,
}

/// Runs the release workflow.
///
/// 1. Resolve the latest release and its version, falling back to the
///    configured base version.
/// 2. Bump per the requested kind.
/// 3. If the latest release targets `commit_sha`, re-tag it in place;
///    otherwise create a new release at `commit_sha` and upload the
///    artifact under its base file name.
///
/// Exactly one mutation sequence runs per invocation. Remote failures in
/// the mutation phase propagate to the caller.
pub async fn run<H: ReleaseHost>(
    host: &H,
    inputs: &Inputs,
    commit_sha: &str,
) -> Result<PublishOutcome> {
    let ResolvedRelease {
        version: last_version,
        release: last_release,
    } = resolver::resolve_latest(host, inputs.base_version).await?;

    let new_version = last_version.bump(inputs.bump);
    ui::display_version_change(last_version, new_version);

    let tag = new_version.to_string();

    match last_release {
        Some(release) if release.target_commitish == commit_sha => {
            // Re-tagging the same commit: rewrite the existing release
            // rather than stacking a second one on top of it.
            host.update_release(release.id, &tag, &tag).await?;
            Ok(PublishOutcome {
                previous: last_version,
                version: new_version,
                action: PublishAction::Updated {
                    release_id: release.id,
                },
            })
        }
        _ => {
            let created = host.create_release(&tag, &tag, commit_sha).await?;

            let file_name = inputs
                .upload_file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    ReleaseBumpError::config(format!(
                        "upload file \"{}\" has no file name",
                        inputs.upload_file.display()
                    ))
                })?;
            let bytes = tokio::fs::read(&inputs.upload_file).await?;
            host.upload_asset(created.id, &file_name, bytes).await?;

            Ok(PublishOutcome {
                previous: last_version,
                version: new_version,
                action: PublishAction::Created {
                    release_id: created.id,
                    asset: file_name,
                },
            })
        }
    }
}
