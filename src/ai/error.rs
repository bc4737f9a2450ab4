use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode inference response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("inference call timed out after {0:?}")]
    Timeout(Duration),

    #[error("inference response contained no result")]
    EmptyResponse,
}
