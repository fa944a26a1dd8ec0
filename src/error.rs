use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The secure random source could not supply salt bytes.
    #[error("Entropy unavailable: {0}")]
    EntropyUnavailable(String),

    /// Verification was asked to run without a stored record.
    #[error("No hash record given")]
    MissingRecord,

    /// A stored salt or hash (or a PHC string) could not be decoded.
    #[error("Malformed {field} encoding: {reason}")]
    MalformedEncoding { field: &'static str, reason: String },

    /// The parameter set was rejected before or during derivation.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A pooled hash/verify task did not run to completion.
    #[error("Worker failed: {0}")]
    WorkerFailed(String),
}

impl Error {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Error::MalformedEncoding {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_params(reason: impl Into<String>) -> Self {
        Error::InvalidParameters(reason.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
