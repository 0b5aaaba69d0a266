use specdrift_core::DriftError;
use thiserror::Error;

/// Failures of the network-facing parts of the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("GOOGLE_API_KEY is not set (pass --api-key or export GOOGLE_API_KEY)")]
    MissingApiKey,

    #[error("invalid url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid header {0:?} (expected `Name: value`)")]
    InvalidHeader(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("reconciliation API returned {status}: {body}")]
    LlmStatus { status: u16, body: String },

    #[error("reconciliation API returned no text")]
    EmptyCompletion,

    #[error(transparent)]
    Decision(#[from] DriftError),

    #[error("failed to format timestamp: {0}")]
    Clock(#[from] time::error::Format),
}
