use git2::Repository;
use std::path::Path;

use crate::error::{ReleaseBumpError, Result};

/// Wrapper around git2 Repository for commit discovery.
///
/// Used when the commit identifier does not arrive through the environment:
/// the release then targets HEAD of the local repository.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Creates a new GitRepo instance for the current working directory.
    ///
    /// Discovers the git repository in the current directory or parent directories.
    pub fn new() -> Result<Self> {
        Self::open(".")
    }

    /// Opens a repository discovered from the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = match Repository::discover(path) {
            Ok(repo) => repo,
            Err(e) => {
                return Err(ReleaseBumpError::config(format!(
                    "not in a git repository: {}",
                    e
                )))
            }
        };
        Ok(GitRepo { repo })
    }

    /// Returns the full hex id of the commit HEAD points at.
    pub fn head_commit_sha(&self) -> Result<String> {
        let head = self.repo.head()?;
        let commit = head.peel_to_commit()?;
        Ok(commit.id().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Builds a repository with a single commit and returns it alongside
    // that commit's id.
    fn setup_test_repo() -> (TempDir, String) {
        let temp_dir = TempDir::new().expect("Could not create temp dir");
        let repo = Repository::init(temp_dir.path()).expect("Could not init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        let content_path = temp_dir.path().join("README.md");
        fs::write(&content_path, b"Initial content\n").expect("Could not write initial file");

        let mut index = repo.index().expect("Could not get index");
        index
            .add_path(Path::new("README.md"))
            .expect("Could not add file to index");
        index.write().expect("Could not write index");

        let tree_id = index.write_tree().expect("Could not write tree");
        let tree = repo.find_tree(tree_id).expect("Could not find tree");
        let signature = repo.signature().expect("Could not get sig");

        let commit_id = repo
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                "Initial commit",
                &tree,
                &[],
            )
            .expect("Could not create commit");

        (temp_dir, commit_id.to_string())
    }

    #[test]
    fn test_head_commit_sha() {
        let (temp_dir, commit_id) = setup_test_repo();
        let repo = GitRepo::open(temp_dir.path()).expect("Should discover test repo");
        assert_eq!(repo.head_commit_sha().unwrap(), commit_id);
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let temp_dir = TempDir::new().unwrap();
        // Plain directory with no .git anywhere above it is not guaranteed
        // in CI sandboxes, so only assert the error message shape when the
        // discovery does fail.
        if let Err(e) = GitRepo::open(temp_dir.path()) {
            assert!(e.to_string().contains("git repository"));
        }
    }
}
