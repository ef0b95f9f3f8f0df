//! Core data types shared across the generation pipeline.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Default chat-completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.mistral.ai/v1/chat/completions";

/// Default model identifier sent with every request.
pub const DEFAULT_MODEL: &str = "codestral-latest";

/// Directory (relative to the working directory) that receives Starlight reference pages.
pub const DEFAULT_REFERENCE_DIR: &str = "docs/src/content/docs/reference";

/// Sampling temperature used for every mode.
pub const TEMPERATURE: f64 = 0.5;

/// Author of a [`ChatMessage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    System,
}

/// A single role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }
}

/// Body of a chat-completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub max_tokens: u32,
}

/// Body of a chat-completion response. Fields the pipeline does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

impl ChatResponse {
    /// Content of the first choice, the only one the pipeline consumes.
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first().map(|c| c.message.content.as_str())
    }
}

/// Documentation generation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Markdown documentation written next to the source
    #[default]
    Markdown,
    /// Rewrite the source file with inline documentation comments
    Inline,
    /// Reference page for a Starlight docs site
    Starlight,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Markdown => "markdown",
            GenerationMode::Inline => "inline",
            GenerationMode::Starlight => "starlight",
        }
    }

    pub fn temperature(&self) -> f64 {
        TEMPERATURE
    }

    pub fn max_tokens(&self) -> u32 {
        match self {
            GenerationMode::Markdown | GenerationMode::Inline => 100_000,
            GenerationMode::Starlight => 10_000,
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order in which the payload and the instruction are attached to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageOrder {
    /// Source text first, then the system prompt.
    #[default]
    UserFirst,
    SystemFirst,
}
