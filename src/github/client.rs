use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;

use crate::config::RepoSlug;
use crate::error::{ReleaseBumpError, Result};
use crate::github::{Release, ReleaseHost};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_UPLOAD_BASE: &str = "https://uploads.github.com";

const USER_AGENT_STR: &str = concat!("release-bump/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub REST implementation of [ReleaseHost].
///
/// Holds a configured HTTP client with the credential baked into the
/// default headers; created once at startup and used for the whole run.
#[derive(Debug)]
pub struct GitHubClient {
    http: reqwest::Client,
    repo: RepoSlug,
    api_base: String,
    upload_base: String,
}

impl GitHubClient {
    /// Create a client against api.github.com for the given repository.
    pub fn new(token: &str, repo: RepoSlug) -> Result<Self> {
        Self::with_base_urls(token, repo, DEFAULT_API_BASE, DEFAULT_UPLOAD_BASE)
    }

    /// Create a client with explicit API and upload base URLs.
    ///
    /// Used for self-hosted instances and by tests pointing at a local
    /// server.
    pub fn with_base_urls(
        token: &str,
        repo: RepoSlug,
        api_base: &str,
        upload_base: &str,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            ReleaseBumpError::config("token contains characters that are not valid in a header")
        })?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT_STR)
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(GitHubClient {
            http,
            repo,
            api_base: api_base.trim_end_matches('/').to_string(),
            upload_base: upload_base.trim_end_matches('/').to_string(),
        })
    }

    fn releases_url(&self, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}/releases{}",
            self.api_base, self.repo.owner, self.repo.name, suffix
        )
    }
}

impl ReleaseHost for GitHubClient {
    async fn latest_release(&self) -> Result<Option<Release>> {
        let response = self.http.get(self.releases_url("/latest")).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(ReleaseBumpError::api(format!(
                "fetching latest release for {} failed: HTTP {}",
                self.repo,
                response.status()
            )));
        }

        let release: Release = response.json().await?;
        Ok(Some(release))
    }

    async fn update_release(&self, release_id: u64, tag_name: &str, name: &str) -> Result<()> {
        let response = self
            .http
            .patch(self.releases_url(&format!("/{}", release_id)))
            .json(&json!({ "tag_name": tag_name, "name": name }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReleaseBumpError::api(format!(
                "updating release {} failed: HTTP {}",
                release_id,
                response.status()
            )));
        }
        Ok(())
    }

    async fn create_release(
        &self,
        tag_name: &str,
        name: &str,
        target_commitish: &str,
    ) -> Result<Release> {
        let response = self
            .http
            .post(self.releases_url(""))
            .json(&json!({
                "tag_name": tag_name,
                "name": name,
                "target_commitish": target_commitish,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReleaseBumpError::api(format!(
                "creating release {} failed: HTTP {}",
                tag_name,
                response.status()
            )));
        }

        let release: Release = response.json().await?;
        Ok(release)
    }

    async fn upload_asset(&self, release_id: u64, file_name: &str, bytes: Vec<u8>) -> Result<()> {
        // Asset uploads go to the dedicated upload host, not the API host.
        let url = format!(
            "{}/repos/{}/{}/releases/{}/assets",
            self.upload_base, self.repo.owner, self.repo.name, release_id
        );

        let response = self
            .http
            .post(url)
            .query(&[("name", file_name)])
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(bytes)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ReleaseBumpError::api(format!(
                "uploading asset \"{}\" to release {} failed: HTTP {}",
                file_name,
                release_id,
                response.status()
            )));
        }
        Ok(())
    }
}
