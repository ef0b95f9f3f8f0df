//! Generate command implementation

use anyhow::Result;
use clap::Args;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::{GenerationMode, MessageOrder};
use crate::generate::Pipeline;

#[derive(Args)]
pub struct GenerateArgs {
    /// Source file to document
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Documentation mode
    #[arg(short, long, value_enum, default_value_t = GenerationMode::Markdown)]
    pub mode: GenerationMode,

    /// Output path (markdown: <SOURCE>.md, inline: SOURCE, starlight: reference page named after SOURCE)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Abort on the first failed step and exit non-zero
    #[arg(long)]
    pub strict: bool,

    /// Request deadline in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Send the system prompt before the source text
    #[arg(long)]
    pub system_first: bool,

    /// Model identifier
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,
}

pub fn run(args: GenerateArgs, mut config: Config) -> Result<()> {
    if let Some(model) = args.model {
        config.model = model;
    }
    if args.timeout.is_some() {
        config.timeout_secs = args.timeout;
    }
    if args.system_first {
        config.message_order = MessageOrder::SystemFirst;
    }
    config.strict |= args.strict;

    let destination = args.output.unwrap_or_else(|| default_destination(args.mode, &args.source));
    tracing::debug!(
        "Generating {} docs for {} -> {}",
        args.mode,
        args.source.display(),
        destination.display()
    );

    let report = Pipeline::from_config(&config).run(args.mode, &args.source, &destination);

    if let Some(path) = &report.written {
        println!("Wrote {}", path.display());
    }

    if config.strict {
        if let Some(failure) = report.first_failure() {
            anyhow::bail!("{} step failed: {}", failure.step.as_str(), failure.error);
        }
    }
    Ok(())
}

fn default_destination(mode: GenerationMode, source: &Path) -> PathBuf {
    match mode {
        GenerationMode::Markdown => {
            let mut name = OsString::from(source.as_os_str());
            name.push(".md");
            PathBuf::from(name)
        }
        GenerationMode::Inline | GenerationMode::Starlight => source.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_defaults_next_to_source() {
        assert_eq!(
            default_destination(GenerationMode::Markdown, Path::new("cmd/generate.go")),
            PathBuf::from("cmd/generate.go.md")
        );
    }

    #[test]
    fn inline_rewrites_source() {
        assert_eq!(
            default_destination(GenerationMode::Inline, Path::new("src/lib.rs")),
            PathBuf::from("src/lib.rs")
        );
    }
}
