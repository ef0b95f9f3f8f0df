//! docgen: documentation generation through a hosted chat-completion API
//!
//! A source file is sent to the model together with a mode-specific system
//! prompt, and the reply is written back as Markdown, as an inline-commented
//! rewrite of the source, or as a Starlight reference page.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod generate;
pub mod site;
pub mod utils;

pub use error::{GenerateError, Result};
