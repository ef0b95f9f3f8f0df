//! Error taxonomy for the generation pipeline.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    /// A credential or prompt is missing from the configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Request serialization or network failure.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status code: {0}")]
    UnexpectedStatus(u16),

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no fenced code block found in model output")]
    NoCodeBlockFound,
}

impl GenerateError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { action, path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_names_path() {
        let err = GenerateError::io(
            "read",
            "src/main.go",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "failed to read src/main.go: gone");
    }

    #[test]
    fn status_error_message() {
        assert_eq!(GenerateError::UnexpectedStatus(401).to_string(), "unexpected status code: 401");
    }
}
