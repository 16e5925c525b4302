use thiserror::Error;

/// Errors surfaced by the normalization entry points.
///
/// Content problems (garbled lines, NaN readings, bad timestamps) are never
/// errors; only input of the wrong shape is rejected.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not of the kind the entry point accepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A telemetry payload that is not syntactically valid JSON.
    #[error("invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
