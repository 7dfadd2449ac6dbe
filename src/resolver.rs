//! Latest-release resolution with base-version fallback.

use crate::error::Result;
use crate::github::{Release, ReleaseHost};
use crate::ui;
use crate::version::Version;

/// Outcome of resolving the repository's latest release.
///
/// `release` is `None` whenever the fallback version was used: no release
/// exists, the lookup failed, or the latest tag did not parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub version: Version,
    pub release: Option<Release>,
}

/// Resolves the latest release and its version, degrading to `base_version`.
///
/// "No release", "lookup failed" and "unparsable tag" are not errors here:
/// each is reported on the terminal and falls back to the base version with
/// no associated release.
pub async fn resolve_latest<H: ReleaseHost>(
    host: &H,
    base_version: Version,
) -> Result<ResolvedRelease> {
    let latest = match host.latest_release().await {
        Ok(latest) => latest,
        Err(e) => {
            ui::display_status(&format!(
                "Could not fetch latest release ({}), using base version {}",
                e, base_version
            ));
            return Ok(ResolvedRelease {
                version: base_version,
                release: None,
            });
        }
    };

    let release = match latest {
        Some(release) => release,
        None => {
            ui::display_status(&format!(
                "No existing release found, using base version {}",
                base_version
            ));
            return Ok(ResolvedRelease {
                version: base_version,
                release: None,
            });
        }
    };

    match Version::parse(&release.tag_name) {
        Some(version) => Ok(ResolvedRelease {
            version,
            release: Some(release),
        }),
        None => {
            ui::display_warning(&format!(
                "Latest release has invalid version \"{}\", reverting to base version {}",
                release.tag_name, base_version
            ));
            Ok(ResolvedRelease {
                version: base_version,
                release: None,
            })
        }
    }
}
