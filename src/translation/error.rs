use reqwest::StatusCode;

/// Why a single request to a provider did not yield a translation.
///
/// Every variant is retried the same way; the distinction only matters for
/// diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum AttemptError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}
