use thiserror::Error;

/// Failure modes of patch generation and serialization.
///
/// Every failure is terminal for the current run; nothing here is retried.
#[derive(Debug, Error)]
pub enum PatchError {
    /// A module kind was requested that the catalog does not define.
    #[error("unknown module kind `{0}`")]
    UnknownKind(String),

    /// The output sink rejected a write.
    #[error("failed to write patch: {0}")]
    SinkWrite(#[from] std::io::Error),
}

impl From<serde_json::Error> for PatchError {
    fn from(err: serde_json::Error) -> Self {
        PatchError::SinkWrite(err.into())
    }
}

pub type Result<T> = std::result::Result<T, PatchError>;
