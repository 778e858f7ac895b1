//! Commit retrieval via the system git binary.

pub mod args;
pub mod commits;

pub use args::GitLogArgs;
pub use commits::{
    CommitBatch, check_git_installed, describe_repository, ensure_git_repository, fetch_commits,
};
