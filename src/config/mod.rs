//! Configuration model and persistence.
//!
//! The config lives as pretty-printed JSON in the per-user config
//! directory and is created with built-in defaults on first run.

pub mod store;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use store::{apply_env_override, config_path, load, save, set, API_KEY_ENV, CONFIG_DIR_ENV};

/// Persisted tool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Git author email used to filter commits.
    pub author: String,
    /// Gemini API key. Overridden at load time by `GEMINI_API_KEY`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Template key used when no --template flag is given.
    pub default_type: String,
    /// Named time windows, keyed by interval key (daily, weekly, ...).
    pub intervals: BTreeMap<String, Interval>,
    /// Named prompt templates, keyed by template key (report, ...).
    pub templates: BTreeMap<String, Template>,
    pub git_settings: GitSettings,
}

/// A named relative time window understood by git's date parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interval {
    pub since: String,
    pub until: String,
    /// Display name shown in banners and substituted into prompts.
    pub name: String,
}

/// A named prompt skeleton with `{{commits}}` and `{{interval}}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub prompt: String,
    pub description: String,
}

/// Settings controlling the git log invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitSettings {
    pub include_merges: bool,
    pub branches: Vec<String>,
    pub exclude_paths: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let mut intervals = BTreeMap::new();
        intervals.insert(
            "daily".to_string(),
            Interval {
                since: "yesterday.midnight".to_string(),
                until: "now".to_string(),
                name: "Daily".to_string(),
            },
        );
        intervals.insert(
            "weekly".to_string(),
            Interval {
                since: "1.week.ago".to_string(),
                until: "now".to_string(),
                name: "Weekly".to_string(),
            },
        );
        intervals.insert(
            "monthly".to_string(),
            Interval {
                since: "1.month.ago".to_string(),
                until: "now".to_string(),
                name: "Monthly".to_string(),
            },
        );

        let mut templates = BTreeMap::new();
        templates.insert(
            "report".to_string(),
            Template {
                name: "Status Report".to_string(),
                description: "Professional status report format".to_string(),
                prompt: "\
Based on the following git commits from the {{interval}} period, create a professional status report:

Git Commits:
{{commits}}

Create a structured report with:
1. **Summary**: Brief overview of accomplishments
2. **Key Changes**: Main features or improvements
3. **Technical Details**: Important technical aspects
4. **Impact**: How these changes benefit the project
5. **Next Steps**: Planned future work

Format as a professional status update."
                    .to_string(),
            },
        );
        templates.insert(
            "transcript".to_string(),
            Template {
                name: "Meeting Transcript".to_string(),
                description: "Daily standup meeting format".to_string(),
                prompt: "\
Based on the following git commits from the {{interval}} period, create a standup meeting update:

Git Commits:
{{commits}}

Format as a standup meeting entry:
- **What I accomplished**: Summary of completed work
- **Current focus**: What I'm working on now
- **Next priorities**: Upcoming tasks
- **Blockers/Notes**: Any challenges or important notes

Keep it conversational and concise."
                    .to_string(),
            },
        );
        templates.insert(
            "summary".to_string(),
            Template {
                name: "Work Summary".to_string(),
                description: "Concise work summary".to_string(),
                prompt: "\
Summarize the following git commits from the {{interval}} period:

{{commits}}

Provide a concise summary of the work done, highlighting the most important changes and their purpose."
                    .to_string(),
            },
        );

        Self {
            author: String::new(),
            api_key: None,
            default_type: "report".to_string(),
            intervals,
            templates,
            git_settings: GitSettings {
                include_merges: false,
                branches: vec!["--all".to_string()],
                exclude_paths: Vec::new(),
            },
        }
    }
}

/// Mask an API key for display.
///
/// `None`/empty keys render as `<not set>`, short keys (under 8 chars)
/// as `***`, and longer keys keep only their first and last 4 chars.
pub fn mask_api_key(key: Option<&str>) -> String {
    let Some(k) = key.filter(|k| !k.is_empty()) else {
        return "<not set>".to_string();
    };
    let chars: Vec<char> = k.chars().collect();
    if chars.len() < 8 {
        return "***".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}****{tail}")
}
