//! Prompt rendering and the Gemini generateContent client.

pub mod client;
pub mod prompt;

pub use client::GeminiClient;
pub use prompt::render_prompt;
