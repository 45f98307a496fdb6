//! Error type shared by every code in this crate.

use thiserror::Error;

/// Errors produced while configuring, encoding, checking or decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Code parameters or a mode string were rejected at construction time.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A vector or matrix contained something other than 0 and 1, or an index was out of range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A vector had the wrong number of bits for the requested operation.
    #[error("length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A nonzero syndrome was found in detect-only mode, or one that no single-bit error produces.
    #[error("bit error detected (syndrome {syndrome}) and not corrected")]
    Uncorrectable { syndrome: String },

    /// The structural matrices of a code could not be built.
    #[error("code construction failed: {0}")]
    Construction(String),

    /// An error probability outside `[0, 1]`.
    #[error("error probability must be between 0 and 1, got {0}")]
    InvalidProbability(f64),
}
