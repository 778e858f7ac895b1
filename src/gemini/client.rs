//! The Gemini generateContent HTTP client.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Config;
use crate::error::GeminiError;
use crate::gemini::prompt::render_prompt;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash-latest:generateContent";

/// Default request timeout for the API call (60 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default timeout.
const TIMEOUT_ENV_VAR: &str = "ANGELIA_HTTP_TIMEOUT";

/// Get the configured request timeout.
///
/// Reads from ANGELIA_HTTP_TIMEOUT (seconds) if set, otherwise uses the
/// default of 60 seconds. Logs a warning if the variable is set but
/// does not parse.
fn get_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Duration::from_secs(secs),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}

/// Client for one-shot message generation against the Gemini API.
///
/// One synchronous request/response round trip per invocation: no
/// retry, no streaming.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .timeout(get_timeout())
            .build()
            .map_err(GeminiError::RequestFailed)?;

        Ok(Self {
            http,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different endpoint (used by tests to hit a
    /// mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Render the named template with the fetched commits and send it.
    ///
    /// Unknown template or interval keys fail before any network I/O.
    /// A language other than "en" appends one instruction line to the
    /// rendered prompt.
    pub async fn generate_message(
        &self,
        config: &Config,
        commits: &[String],
        template_key: &str,
        interval_key: &str,
        language: &str,
    ) -> Result<String, GeminiError> {
        let template =
            config
                .templates
                .get(template_key)
                .ok_or_else(|| GeminiError::UnknownTemplate {
                    key: template_key.to_string(),
                    available: joined_keys(config.templates.keys()),
                })?;
        let interval =
            config
                .intervals
                .get(interval_key)
                .ok_or_else(|| GeminiError::UnknownInterval {
                    key: interval_key.to_string(),
                    available: joined_keys(config.intervals.keys()),
                })?;

        let mut prompt = render_prompt(template, commits, &interval.name)?;
        if !language.is_empty() && language != "en" {
            prompt.push_str(&format!("\n\nWrite the response in {language}."));
        }

        self.call_api(&prompt).await
    }

    /// POST one generateContent request and extract the first text part.
    async fn call_api(&self, prompt: &str) -> Result<String, GeminiError> {
        let request = GenerateRequest::for_prompt(prompt);
        let url = format!("{}{}", self.base_url, GENERATE_PATH);

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(GeminiError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::ApiStatus {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(GeminiError::ParseFailed)?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(GeminiError::EmptyResponse)
    }
}

fn joined_keys<'a>(keys: impl Iterator<Item = &'a String>) -> String {
    keys.map(String::as_str).collect::<Vec<_>>().join(", ")
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    safety_settings: Vec<SafetySetting>,
}

impl GenerateRequest {
    fn for_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.7,
                top_k: 32,
                top_p: 1.0,
                max_output_tokens: 1000,
            },
            safety_settings: vec![
                SafetySetting {
                    category: "HARM_CATEGORY_HARASSMENT".to_string(),
                    threshold: "BLOCK_MEDIUM_AND_ABOVE".to_string(),
                },
                SafetySetting {
                    category: "HARM_CATEGORY_HATE_SPEECH".to_string(),
                    threshold: "BLOCK_MEDIUM_AND_ABOVE".to_string(),
                },
            ],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_k: u32,
    top_p: f64,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}
