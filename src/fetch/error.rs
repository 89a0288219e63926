use thiserror::Error;

/// Failure of a single statement fetch. Carries the technical cause for
/// diagnostics; user-facing wording is decided by the view layer.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
