//! angelia - A CLI tool that turns your recent git commits into status
//! reports and standup updates using Gemini.
//!
//! # Overview
//!
//! angelia shells out to `git log` for the commits an author made in a
//! named time window, renders them into a prompt template, sends one
//! generateContent request to the Gemini API, and prints the reply.

pub mod config;
pub mod error;
pub mod gemini;
pub mod git;
pub mod report;

// Re-export commonly used types
pub use config::{Config, GitSettings, Interval, Template};
pub use error::{ConfigError, GeminiError, GitError};
pub use gemini::GeminiClient;
pub use git::{CommitBatch, GitLogArgs};
pub use report::{GenerateOptions, ResolvedOptions};
