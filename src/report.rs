//! The generate pipeline and the config subcommands.
//!
//! Settings resolve with strict precedence: explicit flag, then config
//! default, then hardcoded fallback. All validation happens here, before
//! any git or network call.

use anyhow::{Context, Result, bail};
use tracing::warn;

use crate::config::{self, Config, mask_api_key};
use crate::gemini::GeminiClient;
use crate::git;

/// Flag values from the command line; `None` falls through to the
/// config default or the hardcoded fallback.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub author: Option<String>,
    pub interval: Option<String>,
    pub template: Option<String>,
    pub api_key: Option<String>,
    pub language: Option<String>,
}

/// Fully resolved, validated settings for one generate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub author: String,
    pub interval: String,
    pub template: String,
    pub api_key: String,
    pub language: String,
}

/// Resolve effective settings: flag > config default > fallback.
///
/// Fails fast on a missing author or API key and on unknown
/// template/interval keys, listing the valid keys.
pub fn resolve_options(opts: &GenerateOptions, config: &Config) -> Result<ResolvedOptions> {
    let author = opts
        .author
        .clone()
        .filter(|a| !a.is_empty())
        .or_else(|| Some(config.author.clone()).filter(|a| !a.is_empty()));
    let Some(author) = author else {
        bail!(
            "Author email is required. Use --author or run 'angelia config set author <email>'"
        );
    };

    let template = opts
        .template
        .clone()
        .unwrap_or_else(|| config.default_type.clone());
    let interval = opts.interval.clone().unwrap_or_else(|| "daily".to_string());
    let language = opts.language.clone().unwrap_or_else(|| "en".to_string());

    let api_key = opts
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .or_else(|| config.api_key.clone().filter(|k| !k.is_empty()));
    let Some(api_key) = api_key else {
        bail!(
            "Gemini API key is required. Use --api-key, set GEMINI_API_KEY, or run 'angelia config set api_key <key>'"
        );
    };

    if !config.templates.contains_key(&template) {
        bail!(
            "Unknown template: {template}. Available: {}",
            joined_keys(config.templates.keys())
        );
    }
    if !config.intervals.contains_key(&interval) {
        bail!(
            "Unknown interval: {interval}. Available: {}",
            joined_keys(config.intervals.keys())
        );
    }

    Ok(ResolvedOptions {
        author,
        interval,
        template,
        api_key,
        language,
    })
}

/// Run the full pipeline: fetch commits, render, call Gemini, print.
pub async fn run_generate(opts: &GenerateOptions) -> Result<()> {
    git::check_git_installed().context("git is required")?;

    let mut config = config::load().context("Failed to load config")?;
    config::apply_env_override(&mut config);

    let resolved = resolve_options(opts, &config)?;

    git::ensure_git_repository().await?;

    match git::describe_repository().await {
        Ok(info) => println!("Repository: {info}"),
        Err(e) => warn!("Could not get repository info: {e}"),
    }

    let interval = &config.intervals[&resolved.interval];
    let batch = git::fetch_commits(&resolved.author, interval, &config.git_settings)
        .await
        .context("Failed to fetch commits")?;

    if batch.is_empty() {
        println!(
            "No commits found for {} in {} period.",
            resolved.author, resolved.interval
        );
        return Ok(());
    }

    println!(
        "Found {} commits for {} period",
        batch.commit_count, resolved.interval
    );
    println!("Language: {}", resolved.language);

    let client = GeminiClient::new(&resolved.api_key)?;
    let message = client
        .generate_message(
            &config,
            &batch.lines,
            &resolved.template,
            &resolved.interval,
            &resolved.language,
        )
        .await
        .context("Failed to generate message")?;

    let template = &config.templates[&resolved.template];
    println!("\n{} ({})", template.name, interval.name);
    println!("{}", "=".repeat(50));
    println!("{message}");

    Ok(())
}

/// Print the resolved configuration with the API key masked.
pub fn run_config_show() -> Result<()> {
    let mut config = config::load().context("Failed to load config")?;
    config::apply_env_override(&mut config);

    println!("Author: {}", config.author);
    println!("Default Template: {}", config.default_type);
    println!("API Key: {}", mask_api_key(config.api_key.as_deref()));

    println!("\nAvailable Intervals:");
    for (key, interval) in &config.intervals {
        println!(
            "  {key}: {} ({} to {})",
            interval.name, interval.since, interval.until
        );
    }

    println!("\nAvailable Templates:");
    for (key, template) in &config.templates {
        println!("  {key}: {} - {}", template.name, template.description);
    }

    Ok(())
}

/// Set one config value and persist it.
///
/// Loads without the env override so an environment-sourced API key is
/// never written back to disk.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    let mut config = config::load().context("Failed to load config")?;

    config::set(&mut config, key, value).context("Failed to save config")?;

    // The API key is a secret; echo it masked
    let shown = if key == "api_key" {
        mask_api_key(Some(value))
    } else {
        value.to_string()
    };
    println!("Set {key} = {shown}");

    Ok(())
}

fn joined_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    keys.map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_author_and_key() -> Config {
        let mut config = Config::default();
        config.author = "dev@example.com".to_string();
        config.api_key = Some("stored-key-1234".to_string());
        config
    }

    #[test]
    fn test_flag_beats_config_default() {
        let config = config_with_author_and_key();
        let opts = GenerateOptions {
            author: Some("other@example.com".to_string()),
            template: Some("summary".to_string()),
            ..Default::default()
        };

        let resolved = resolve_options(&opts, &config).unwrap();

        assert_eq!(resolved.author, "other@example.com");
        assert_eq!(resolved.template, "summary");
    }

    #[test]
    fn test_config_default_beats_fallback() {
        let mut config = config_with_author_and_key();
        config.default_type = "transcript".to_string();

        let resolved = resolve_options(&GenerateOptions::default(), &config).unwrap();

        assert_eq!(resolved.template, "transcript");
        assert_eq!(resolved.interval, "daily");
        assert_eq!(resolved.language, "en");
    }

    #[test]
    fn test_missing_author_fails_fast() {
        let mut config = config_with_author_and_key();
        config.author = String::new();

        let err = resolve_options(&GenerateOptions::default(), &config).unwrap_err();

        assert!(err.to_string().contains("Author email is required"));
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let mut config = config_with_author_and_key();
        config.api_key = None;

        let err = resolve_options(&GenerateOptions::default(), &config).unwrap_err();

        assert!(err.to_string().contains("API key is required"));
    }

    #[test]
    fn test_api_key_flag_beats_stored_key() {
        let config = config_with_author_and_key();
        let opts = GenerateOptions {
            api_key: Some("flag-key".to_string()),
            ..Default::default()
        };

        let resolved = resolve_options(&opts, &config).unwrap();

        assert_eq!(resolved.api_key, "flag-key");
    }

    #[test]
    fn test_unknown_template_lists_valid_keys() {
        let config = config_with_author_and_key();
        let opts = GenerateOptions {
            template: Some("novel".to_string()),
            ..Default::default()
        };

        let err = resolve_options(&opts, &config).unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("Unknown template: novel"));
        assert!(msg.contains("report"));
        assert!(msg.contains("summary"));
        assert!(msg.contains("transcript"));
    }

    #[test]
    fn test_unknown_interval_lists_valid_keys() {
        let config = config_with_author_and_key();
        let opts = GenerateOptions {
            interval: Some("hourly".to_string()),
            ..Default::default()
        };

        let err = resolve_options(&opts, &config).unwrap_err();
        let msg = err.to_string();

        assert!(msg.contains("Unknown interval: hourly"));
        assert!(msg.contains("daily"));
        assert!(msg.contains("monthly"));
        assert!(msg.contains("weekly"));
    }
}
