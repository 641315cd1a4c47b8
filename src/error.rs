//! Error Module - Collector Error Types
//!
//! Defines all error types surfaced by the collector's public API.

use thiserror::Error;

/// Main error type for all collector operations.
#[derive(Debug, Error)]
pub enum CollectorError {
    #[error("underlying allocator failed: requested {requested} bytes")]
    AllocationFailed { requested: usize },

    #[error("address {address:#x} is not a registered object")]
    UnregisteredAddress { address: usize },

    #[error("invalid state: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    #[error("collection gate unlocked without a matching block_collect()")]
    GateImbalance,

    #[error("background driver is already running")]
    BackgroundAlreadyRunning,

    #[error("background driver is not running")]
    BackgroundNotRunning,

    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type alias for collector operations.
pub type Result<T> = std::result::Result<T, CollectorError>;
