//! Error types for angelia modules using thiserror.

use thiserror::Error;

/// Errors from configuration loading, saving, and mutation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine the user configuration directory")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeFailed(#[source] serde_json::Error),

    #[error("Unknown config key: {0}. Valid keys: author, default_type, api_key")]
    UnknownKey(String),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
}

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git binary not found. Install git and make sure it is on your PATH")]
    GitNotInstalled,

    #[error(
        "Current directory is not a git repository. Run angelia from within a git repository"
    )]
    NotARepository,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error(
        "git log failed: {stderr}. Make sure you have commits from author '{author}' in the selected period"
    )]
    LogFailed { author: String, stderr: String },

    #[error("Could not determine repository info")]
    RepoInfoUnavailable,
}

/// Errors from prompt rendering and the Gemini API call.
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Unknown template: {key}. Available: {available}")]
    UnknownTemplate { key: String, available: String },

    #[error("Unknown interval: {key}. Available: {available}")]
    UnknownInterval { key: String, available: String },

    #[error("Template contains unresolved placeholder '{0}'")]
    UnresolvedPlaceholder(String),

    #[error("API request failed: {0}")]
    RequestFailed(#[source] reqwest::Error),

    #[error("API error ({status}): {body}")]
    ApiStatus { status: u16, body: String },

    #[error("Failed to parse API response: {0}")]
    ParseFailed(#[source] reqwest::Error),

    #[error("empty response from API")]
    EmptyResponse,
}
