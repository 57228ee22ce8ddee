//! Error types shared by the scheduler configuration and the weight optimizer.

/// Crate error type
///
/// Every variant is an input-contract violation; nothing in the engines is
/// transient, so there is nothing to retry.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller supplied data the engine cannot work with
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Parameters could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Crate result type
pub type Result<T> = std::result::Result<T, Error>;
