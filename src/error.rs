use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the collaborators around the analyzer.
///
/// The analyzer itself never fails; these come from reading documents,
/// loading configuration and talking to the history store.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("unsupported file type for '{name}' (expected PDF, DOCX or plain text)")]
    UnsupportedFormat { name: String },

    #[error("failed to read '{name}': {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to extract text from '{name}': {reason}")]
    ExtractionFailure { name: String, reason: String },

    #[error("history store error: {0}")]
    PersistenceFailure(String),

    #[error("invalid configuration in {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
}

impl AnalyzerError {
    pub(crate) fn extraction(name: &str, reason: impl ToString) -> Self {
        Self::ExtractionFailure {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn persistence(reason: impl ToString) -> Self {
        Self::PersistenceFailure(reason.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
