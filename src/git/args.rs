//! Declarative construction of the git log argument list.
//!
//! Building the token list separately from the subprocess call keeps the
//! invocation contract testable without spawning git.

use crate::config::{GitSettings, Interval};

/// An immutable, ordered list of argument tokens for one `git log` run.
///
/// Token order: `log`, `--since`, `--until`, configured branches,
/// `--no-merges` (unless merges are included), `--author`, then a `--`
/// separator followed by one `:!<path>` pathspec per excluded path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitLogArgs {
    tokens: Vec<String>,
}

impl GitLogArgs {
    pub fn new(author: &str, interval: &Interval, settings: &GitSettings) -> Self {
        let mut tokens = vec![
            "log".to_string(),
            format!("--since={}", interval.since),
            format!("--until={}", interval.until),
        ];

        tokens.extend(settings.branches.iter().cloned());

        if !settings.include_merges {
            tokens.push("--no-merges".to_string());
        }

        tokens.push(format!("--author={author}"));

        // Exclusions are real pathspec tokens after a single `--`
        // separator; a fused "-- ':!path'" token never matches under
        // execve argument passing.
        if !settings.exclude_paths.is_empty() {
            tokens.push("--".to_string());
            for path in &settings.exclude_paths {
                tokens.push(format!(":!{path}"));
            }
        }

        Self { tokens }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weekly() -> Interval {
        Interval {
            since: "1.week.ago".to_string(),
            until: "now".to_string(),
            name: "Weekly".to_string(),
        }
    }

    fn settings() -> GitSettings {
        GitSettings {
            include_merges: false,
            branches: vec!["--all".to_string()],
            exclude_paths: Vec::new(),
        }
    }

    #[test]
    fn test_basic_invocation_order() {
        let args = GitLogArgs::new("dev@example.com", &weekly(), &settings());

        assert_eq!(
            args.tokens(),
            &[
                "log",
                "--since=1.week.ago",
                "--until=now",
                "--all",
                "--no-merges",
                "--author=dev@example.com",
            ]
        );
    }

    #[test]
    fn test_include_merges_omits_no_merges_flag() {
        let mut s = settings();
        s.include_merges = true;

        let args = GitLogArgs::new("dev@example.com", &weekly(), &s);

        assert!(!args.tokens().contains(&"--no-merges".to_string()));
    }

    #[test]
    fn test_branches_kept_in_configured_order() {
        let mut s = settings();
        s.branches = vec!["main".to_string(), "develop".to_string()];

        let args = GitLogArgs::new("dev@example.com", &weekly(), &s);
        let tokens = args.tokens();

        let main_pos = tokens.iter().position(|t| t == "main").unwrap();
        let develop_pos = tokens.iter().position(|t| t == "develop").unwrap();
        assert!(main_pos < develop_pos);
        assert_eq!(main_pos, 3);
    }

    #[test]
    fn test_author_is_last_filter_before_exclusions() {
        let mut s = settings();
        s.exclude_paths = vec!["target".to_string(), "docs".to_string()];

        let args = GitLogArgs::new("dev@example.com", &weekly(), &s);

        assert_eq!(
            args.tokens(),
            &[
                "log",
                "--since=1.week.ago",
                "--until=now",
                "--all",
                "--no-merges",
                "--author=dev@example.com",
                "--",
                ":!target",
                ":!docs",
            ]
        );
    }

    #[test]
    fn test_no_separator_without_exclusions() {
        let args = GitLogArgs::new("dev@example.com", &weekly(), &settings());
        assert!(!args.tokens().contains(&"--".to_string()));
    }
}
