use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by [`crate::BufferedTreeConfig`] validation.
///
/// `put`/`get`/`del` are infallible by design: once a tree is constructed,
/// every operation on it is unconditionally successful.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("container threshold must be at least {min}, got {actual}")]
    ContainerThresholdTooSmall { min: usize, actual: usize },
    #[error("payload threshold must be at least {min}, got {actual}")]
    PayloadThresholdTooSmall { min: usize, actual: usize },
}
