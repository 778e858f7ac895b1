//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature};

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Change the working directory for the duration of a test.
///
/// Restores the previous directory on drop. Tests using this must run
/// with #[serial] since the working directory is process-global.
pub struct DirGuard {
    previous: PathBuf,
}

impl DirGuard {
    pub fn enter(path: &Path) -> Self {
        let previous = std::env::current_dir().expect("Failed to read current dir");
        std::env::set_current_dir(path).expect("Failed to change directory");
        Self { previous }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Create a commit with the default test author. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        self.commit_as(message, "Test User", "test@example.com")
    }

    /// Create a commit attributed to a specific author.
    pub fn commit_as(&self, message: &str, name: &str, email: &str) -> Oid {
        let sig = Signature::now(name, email).expect("Failed to create signature");

        // Create or update a file to have something to commit
        let file_path = self.dir.path().join("test.txt");
        let content = format!(
            "{}\n{}",
            message,
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .expect("clock before epoch")
                .as_nanos()
        );
        std::fs::write(&file_path, content).expect("Failed to write test file");

        // Add the file to the index
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_path(Path::new("test.txt"))
            .expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        // Get parent commit if exists
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Add an origin remote with the given URL.
    pub fn add_origin(&self, url: &str) {
        self.repo
            .remote("origin", url)
            .expect("Failed to add origin remote");
    }
}
