use thiserror::Error;

/// Errors that can occur when mutating a [`BiMap`](crate::BiMap).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The value is already mapped to a different key.
    #[error("value is already mapped to a different key")]
    InvalidMapping,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
