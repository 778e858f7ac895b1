//! Rendering prompt templates.
//!
//! Templates are plain text with `{{commits}}` and `{{interval}}`
//! placeholders. Rendering is a textual substitution; an unknown or
//! unterminated placeholder in the template is a hard failure rather
//! than silently reaching the API.

use crate::config::Template;
use crate::error::GeminiError;

const COMMITS_PLACEHOLDER: &str = "{{commits}}";
const INTERVAL_PLACEHOLDER: &str = "{{interval}}";

/// Render a template with the commit block and interval display name.
///
/// Placeholders are validated against the template text before
/// substitution, so braces inside commit messages can never trip the
/// check.
pub fn render_prompt(
    template: &Template,
    commits: &[String],
    interval_name: &str,
) -> Result<String, GeminiError> {
    validate_placeholders(&template.prompt)?;

    let commit_block = commits.join("\n");
    let rendered = template
        .prompt
        .replace(COMMITS_PLACEHOLDER, &commit_block)
        .replace(INTERVAL_PLACEHOLDER, interval_name);

    Ok(rendered)
}

/// Reject templates containing placeholders we cannot resolve.
fn validate_placeholders(prompt: &str) -> Result<(), GeminiError> {
    let mut rest = prompt;
    while let Some(start) = rest.find("{{") {
        let tail = &rest[start..];
        let Some(end) = tail.find("}}") else {
            // Unterminated opener, e.g. "{{commits"
            let fragment: String = tail.chars().take(24).collect();
            return Err(GeminiError::UnresolvedPlaceholder(fragment));
        };
        let token = &tail[..end + 2];
        if token != COMMITS_PLACEHOLDER && token != INTERVAL_PLACEHOLDER {
            return Err(GeminiError::UnresolvedPlaceholder(token.to_string()));
        }
        rest = &tail[end + 2..];
    }
    Ok(())
}
