//! Error types for the data-view layer.
//!
//! Every failure here is an invalid argument rejected synchronously at the
//! point of the call. There is no retry or degraded mode: this layer has no
//! I/O and no concurrency of its own, so an error always signals a
//! programming mistake in the caller.

/// Result type alias for data-view operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the data-view layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Page size must be at least one item.
    #[error("page size cannot be zero")]
    ZeroPageSize,

    /// An item count estimate must be at least one item.
    #[error("item count estimate cannot be zero")]
    ZeroCountEstimate,

    /// The estimate increase must be at least one item.
    #[error("item count estimate increase cannot be zero")]
    ZeroEstimateIncrease,

    /// Exact counting was requested without a way to compute it.
    #[error("exact item count requested but no count callback is registered")]
    MissingCountCallback,
}
