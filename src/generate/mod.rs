//! Documentation generation pipeline
//!
//! source file → [`RequestBuilder`] → [`Transport`] → [`parse_response`] →
//! [`OutputPolicy`] → destination file.
//!
//! Every step yields a `Result`. Failures are recorded in the
//! [`GenerationReport`]; by default the pipeline keeps going with whatever
//! partial state it has, and in strict mode it stops at the first failure.

pub mod output;
pub mod report;
pub mod request;
pub mod response;
pub mod transport;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::domain::{ChatResponse, GenerationMode};
use crate::error::GenerateError;
use crate::utils::encoding::decode_source;

pub use output::{extract_first_fenced_block, write_output, OutputPolicy, Rendered};
pub use report::{GenerationReport, Step, StepFailure};
pub use request::RequestBuilder;
pub use response::parse_response;
pub use transport::{HttpTransport, RawResponse, Transport};

pub struct Pipeline<T: Transport = HttpTransport> {
    builder: RequestBuilder,
    transport: T,
    api_key: Option<String>,
    reference_dir: PathBuf,
    strict: bool,
}

impl Pipeline<HttpTransport> {
    pub fn from_config(config: &Config) -> Self {
        let timeout = config.timeout_secs.map(Duration::from_secs);
        Self::with_transport(config, HttpTransport::new(config.endpoint.clone(), timeout))
    }
}

impl<T: Transport> Pipeline<T> {
    pub fn with_transport(config: &Config, transport: T) -> Self {
        Self {
            builder: RequestBuilder::new(config.model.clone(), config.prompts.clone())
                .order(config.message_order),
            transport,
            api_key: config.api_key.clone(),
            reference_dir: config.reference_dir.clone(),
            strict: config.strict,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Generate documentation for `source` and write it according to `mode`.
    ///
    /// `destination` is the Markdown output file, the file rewritten in Inline
    /// mode, or the path whose file name names the Starlight reference page.
    pub fn run(&self, mode: GenerationMode, source: &Path, destination: &Path) -> GenerationReport {
        let mut report = GenerationReport::new();
        if self.execute(mode, source, destination, &mut report).is_none() {
            tracing::debug!("Pipeline stopped early for {}", source.display());
        }
        report
    }

    /// `None` once the run cannot or must not continue.
    fn execute(
        &self,
        mode: GenerationMode,
        source: &Path,
        destination: &Path,
        report: &mut GenerationReport,
    ) -> Option<()> {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                let err = GenerateError::Config("API key not set (set API_KEY)".to_string());
                self.fail(report, Step::Config, err)?;
                ""
            }
        };

        let source_text = match std::fs::read(source) {
            Ok(bytes) => decode_source(&bytes),
            Err(err) => {
                self.fail(report, Step::ReadSource, GenerateError::io("read", source, err))?;
                String::new()
            }
        };

        let request = self.builder.build(mode, &source_text);

        let raw = match self.transport.send(&request, api_key) {
            Ok(raw) => raw,
            Err(err) => {
                report.record(Step::Send, err);
                return None;
            }
        };

        if let Err(err) = raw.check_status() {
            self.fail(report, Step::Status, err)?;
        }

        let response = match parse_response(&raw.body) {
            Ok(response) => response,
            Err(err) => {
                self.fail(report, Step::Parse, err)?;
                ChatResponse::default()
            }
        };

        let policy = OutputPolicy::for_mode(mode, &self.reference_dir);
        let rendered = match policy.render(&response, destination) {
            Ok(Some(rendered)) => rendered,
            Ok(None) => {
                tracing::info!("Response had no choices; nothing written");
                return Some(());
            }
            Err(err) => {
                report.record(Step::Render, err);
                return None;
            }
        };

        match write_output(&rendered) {
            Ok(()) => {
                let bytes = rendered.bytes.len();
                tracing::info!("Wrote {} ({} bytes)", rendered.path.display(), bytes);
                report.written = Some(rendered.path);
                Some(())
            }
            Err(err) => {
                report.record(Step::Write, err);
                None
            }
        }
    }

    /// Record a failure; `None` when strict mode stops the run here.
    fn fail(&self, report: &mut GenerationReport, step: Step, error: GenerateError) -> Option<()> {
        report.record(step, error);
        (!self.strict).then_some(())
    }
}
