//! Running git log and collecting its raw output.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::config::{GitSettings, Interval};
use crate::error::GitError;
use crate::git::args::GitLogArgs;

/// The raw log lines from one fetch, possibly empty.
#[derive(Debug, Clone, Default)]
pub struct CommitBatch {
    /// Raw `git log` output lines, in git's own order.
    pub lines: Vec<String>,
    /// Best-effort count of commit headers, for user feedback only.
    pub commit_count: usize,
}

impl CommitBatch {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Check that a git binary is on the search path.
///
/// Uses the `which` crate for cross-platform executable detection.
pub fn check_git_installed() -> Result<(), GitError> {
    if which::which("git").is_err() {
        return Err(GitError::GitNotInstalled);
    }
    Ok(())
}

/// Fail unless the current directory is inside a git working tree.
///
/// A `.git` entry is accepted directly; otherwise `git rev-parse
/// --git-dir` decides, which also covers subdirectories and worktrees.
pub async fn ensure_git_repository() -> Result<(), GitError> {
    if Path::new(".git").exists() {
        return Ok(());
    }

    let status = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(GitError::SpawnFailed)?;

    if status.success() {
        Ok(())
    } else {
        Err(GitError::NotARepository)
    }
}

/// Best-effort identity of the current repository.
///
/// Prefers the origin remote URL; falls back to the absolute working
/// directory. Callers treat failure as a warning, not a fatal error.
pub async fn describe_repository() -> Result<String, GitError> {
    let output = Command::new("git")
        .args(["remote", "get-url", "origin"])
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .output()
        .await
        .map_err(GitError::SpawnFailed)?;

    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).trim().to_string());
    }

    let cwd = std::env::current_dir().map_err(|_| GitError::RepoInfoUnavailable)?;
    Ok(format!("Local repository: {}", cwd.display()))
}

/// Run `git log` for one author over one interval and collect the output.
///
/// A non-zero exit is a failure naming the author; empty output is a
/// legitimate empty batch, not an error.
pub async fn fetch_commits(
    author: &str,
    interval: &Interval,
    settings: &GitSettings,
) -> Result<CommitBatch, GitError> {
    let args = GitLogArgs::new(author, interval, settings);

    let output = Command::new("git")
        .args(args.tokens())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(GitError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(GitError::LogFailed {
            author: author.to_string(),
            stderr,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(CommitBatch::default());
    }

    let lines: Vec<String> = trimmed.lines().map(str::to_string).collect();
    let commit_count = lines.iter().filter(|l| l.starts_with("commit ")).count();

    Ok(CommitBatch { lines, commit_count })
}
