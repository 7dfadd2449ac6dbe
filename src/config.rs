use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ReleaseBumpError, Result};
use crate::version::{BumpKind, Version};

/// Fallback version used when neither the CLI nor the config file supplies one.
pub const DEFAULT_BASE_VERSION: &str = "v1.0.0";

/// Optional file-based configuration for release-bump.
///
/// Supplies defaults that CLI flags and environment variables override.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct FileConfig {
    /// Repository slug in "owner/name" form
    #[serde(default)]
    pub repository: Option<String>,

    /// Fallback version when no usable release exists
    #[serde(default)]
    pub base_version: Option<String>,

    /// API base URL override for self-hosted instances
    #[serde(default)]
    pub api_url: Option<String>,

    /// Asset upload base URL override for self-hosted instances
    #[serde(default)]
    pub upload_url: Option<String>,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `release-bump.toml` in current directory
/// 3. `release-bump.toml` in user config directory
/// 4. Default (empty) configuration if no file found
///
/// # Returns
/// * `Ok(FileConfig)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<FileConfig> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./release-bump.toml").exists() {
        fs::read_to_string("./release-bump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("release-bump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(FileConfig::default());
        }
    } else {
        return Ok(FileConfig::default());
    };

    let config: FileConfig = toml::from_str(&config_str)
        .map_err(|e| ReleaseBumpError::config(format!("cannot parse config file: {}", e)))?;
    Ok(config)
}

/// Reads the API credential from the process environment.
///
/// Checked once at startup; the token is passed down as a plain value and
/// never re-read. Empty values count as absent.
pub fn token_from_env() -> Option<String> {
    std::env::var("GITHUB_TOKEN")
        .ok()
        .filter(|t| !t.is_empty())
        .or_else(|| std::env::var("GH_TOKEN").ok().filter(|t| !t.is_empty()))
}

/// Repository identifier in "owner/name" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl FromStr for RepoSlug {
    type Err = ReleaseBumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(RepoSlug {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(ReleaseBumpError::config(format!(
                "repository must be in \"owner/name\" form, got \"{}\"",
                s
            ))),
        }
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Fully validated inputs for one release-bump invocation.
///
/// Every field is checked before any remote call is made; a failure here is
/// fatal and the process never reaches the mutation phase.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub bump: BumpKind,
    pub upload_file: PathBuf,
    pub base_version: Version,
    pub repo: RepoSlug,
    pub token: String,
}

impl Inputs {
    /// Validates the raw invocation inputs against the file configuration.
    ///
    /// Validation order matches the reporting priority: bump kind, upload
    /// file existence, base version, credential, repository slug. The first
    /// failure aborts with a descriptive configuration error.
    ///
    /// # Arguments
    /// * `version_type` - Requested bump kind ("major", "minor" or "patch")
    /// * `upload_file` - Path of the artifact to attach to a new release
    /// * `base_version` - Optional fallback version from the CLI
    /// * `repo` - Optional repository slug from the CLI or environment
    /// * `token` - Credential read from the environment at startup
    /// * `file` - Loaded file configuration supplying defaults
    pub fn resolve(
        version_type: &str,
        upload_file: &str,
        base_version: Option<&str>,
        repo: Option<&str>,
        token: Option<String>,
        file: &FileConfig,
    ) -> Result<Self> {
        let bump = version_type.parse::<BumpKind>()?;

        let upload_file = PathBuf::from(upload_file);
        if !upload_file.is_file() {
            return Err(ReleaseBumpError::config(format!(
                "upload file \"{}\" does not exist",
                upload_file.display()
            )));
        }

        let base_raw = base_version
            .map(str::to_string)
            .or_else(|| file.base_version.clone())
            .unwrap_or_else(|| DEFAULT_BASE_VERSION.to_string());
        let base_version = Version::parse(&base_raw).ok_or_else(|| {
            ReleaseBumpError::version(format!(
                "base_version \"{}\" is not a valid version",
                base_raw
            ))
        })?;

        let token = token.ok_or_else(|| {
            ReleaseBumpError::config("no GITHUB_TOKEN or GH_TOKEN environment variable found")
        })?;

        let repo_raw = repo
            .map(str::to_string)
            .or_else(|| file.repository.clone())
            .ok_or_else(|| {
                ReleaseBumpError::config(
                    "repository not specified: pass --repo, set GITHUB_REPOSITORY, \
                     or add `repository` to release-bump.toml",
                )
            })?;
        let repo = repo_raw.parse::<RepoSlug>()?;

        Ok(Inputs {
            bump,
            upload_file,
            base_version,
            repo,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn artifact() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"artifact bytes").unwrap();
        file.flush().unwrap();
        file
    }

    fn resolve_with_artifact(
        version_type: &str,
        base_version: Option<&str>,
        token: Option<String>,
    ) -> Result<Inputs> {
        let file = artifact();
        Inputs::resolve(
            version_type,
            file.path().to_str().unwrap(),
            base_version,
            Some("octo/widget"),
            token,
            &FileConfig::default(),
        )
    }

    #[test]
    fn test_resolve_valid_inputs() {
        let inputs =
            resolve_with_artifact("patch", Some("v2.0.0"), Some("secret".to_string())).unwrap();
        assert_eq!(inputs.bump, BumpKind::Patch);
        assert_eq!(inputs.base_version, Version::new(2, 0, 0));
        assert_eq!(inputs.repo.owner, "octo");
        assert_eq!(inputs.repo.name, "widget");
        assert_eq!(inputs.token, "secret");
    }

    #[test]
    fn test_resolve_defaults_base_version() {
        let inputs = resolve_with_artifact("minor", None, Some("secret".to_string())).unwrap();
        assert_eq!(inputs.base_version, Version::new(1, 0, 0));
    }

    #[test]
    fn test_resolve_rejects_bad_version_type() {
        let err = resolve_with_artifact("mega", Some("v1.0.0"), Some("secret".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("version_type"));
        assert!(err.to_string().contains("\"mega\""));
    }

    #[test]
    fn test_resolve_rejects_missing_upload_file() {
        let err = Inputs::resolve(
            "patch",
            "/definitely/not/a/real/file.tar.gz",
            Some("v1.0.0"),
            Some("octo/widget"),
            Some("secret".to_string()),
            &FileConfig::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_rejects_bad_base_version() {
        let err = resolve_with_artifact("patch", Some("1.0.0"), Some("secret".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("base_version"));
    }

    #[test]
    fn test_resolve_rejects_missing_token() {
        let err = resolve_with_artifact("patch", Some("v1.0.0"), None).unwrap_err();
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn test_file_config_supplies_defaults() {
        let file_config = FileConfig {
            repository: Some("octo/widget".to_string()),
            base_version: Some("v3.0.0".to_string()),
            ..FileConfig::default()
        };
        let artifact = artifact();
        let inputs = Inputs::resolve(
            "major",
            artifact.path().to_str().unwrap(),
            None,
            None,
            Some("secret".to_string()),
            &file_config,
        )
        .unwrap();
        assert_eq!(inputs.base_version, Version::new(3, 0, 0));
        assert_eq!(inputs.repo.to_string(), "octo/widget");
    }

    #[test]
    fn test_repo_slug_parsing() {
        let slug: RepoSlug = "octo/widget".parse().unwrap();
        assert_eq!(slug.owner, "octo");
        assert_eq!(slug.name, "widget");

        assert!("widget".parse::<RepoSlug>().is_err());
        assert!("/widget".parse::<RepoSlug>().is_err());
        assert!("octo/".parse::<RepoSlug>().is_err());
        assert!("a/b/c".parse::<RepoSlug>().is_err());
    }
}
