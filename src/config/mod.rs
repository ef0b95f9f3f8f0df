//! Configuration loading and merging
//!
//! Settings come from a config file, the environment (including `.env`) and
//! CLI flags, with precedence CLI > Env > File > Defaults. The resulting
//! [`Config`] is built once per process and handed to the pipeline.

pub mod env;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::{
    GenerationMode, MessageOrder, DEFAULT_ENDPOINT, DEFAULT_MODEL, DEFAULT_REFERENCE_DIR,
};

pub use env::apply_env;
pub use loader::load_config;

const MARKDOWN_PROMPT: &str = "You are one of the greatest programmers to ever live, you will receive code and your job is to generate markdown documentation elaborating what the code does. You will return markdown and only markdown. Keep the documentation brief but very clear.";

const INLINE_PROMPT: &str = "You are one of the greatest programmers to ever live, you will receive code and your job is to document it with inline comments in the idiom of its language. Return the complete file, unchanged apart from the added comments, inside a single fenced code block.";

const STARLIGHT_PROMPT: &str = "You are one of the greatest programmers to ever live, you will receive code and your job is to generate markdown documentation elaborating what the code does. You will return markdown and only markdown, in the format expected by the Starlight Astro framework, starting with frontmatter that sets a title.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub endpoint: String,
    /// Bearer token; usually supplied through `API_KEY` rather than the file.
    pub api_key: Option<String>,
    /// Per-request deadline. Unset means the HTTP client's default.
    pub timeout_secs: Option<u64>,
    pub message_order: MessageOrder,
    /// Abort on the first failed step instead of logging and continuing.
    pub strict: bool,
    pub reference_dir: PathBuf,
    pub prompts: PromptCatalog,
    pub site: SiteConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_secs: None,
            message_order: MessageOrder::default(),
            strict: false,
            reference_dir: PathBuf::from(DEFAULT_REFERENCE_DIR),
            prompts: PromptCatalog::default(),
            site: SiteConfig::default(),
        }
    }
}

/// System prompt per generation mode. Contents are opaque to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptCatalog {
    pub markdown: String,
    pub inline: String,
    pub starlight: String,
}

impl Default for PromptCatalog {
    fn default() -> Self {
        Self {
            markdown: MARKDOWN_PROMPT.to_string(),
            inline: INLINE_PROMPT.to_string(),
            starlight: STARLIGHT_PROMPT.to_string(),
        }
    }
}

impl PromptCatalog {
    pub fn prompt_for(&self, mode: GenerationMode) -> &str {
        match mode {
            GenerationMode::Markdown => &self.markdown,
            GenerationMode::Inline => &self.inline,
            GenerationMode::Starlight => &self.starlight,
        }
    }
}

/// Companion docs-site settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub template_repo: Option<String>,
    pub template_ref: Option<String>,
    pub docs_dir: PathBuf,
    pub package_manager: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            template_repo: None,
            template_ref: None,
            docs_dir: PathBuf::from("docs"),
            package_manager: "npm".to_string(),
        }
    }
}
