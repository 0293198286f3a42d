//! Error types for H.264/AVC bitstream parsing.
//!
//! Variants map onto the error taxonomy in spec.md §7: `EndOfStream`,
//! `InvalidCode`, `UnsupportedFeature`, `InconsistentState`, plus narrower
//! per-parser variants that carry more context for the same underlying cause.

use thiserror::Error;

/// AVC parsing error types.
#[derive(Debug, Error)]
pub enum AvcError {
    /// Bit reader exhausted mid-syntax-element.
    #[error("end of stream: expected {expected} bits, {available} available")]
    EndOfStream { expected: usize, available: usize },

    /// An Exp-Golomb or mapped value fell outside the defined tables.
    #[error("invalid code: {0}")]
    InvalidCode(String),

    /// A construct the parser deliberately does not implement.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(String),

    /// Reference to an SPS/PPS id not previously seen.
    #[error("inconsistent state: {0}")]
    InconsistentState(String),

    /// Invalid NAL unit.
    #[error("invalid NAL unit: {0}")]
    InvalidNalUnit(String),

    /// Invalid SPS.
    #[error("invalid SPS: {0}")]
    InvalidSps(String),

    /// Invalid PPS.
    #[error("invalid PPS: {0}")]
    InvalidPps(String),

    /// Invalid slice header.
    #[error("invalid slice header: {0}")]
    InvalidSliceHeader(String),

    /// Invalid SEI.
    #[error("invalid SEI: {0}")]
    InvalidSei(String),
}

/// Result type alias for AVC operations.
pub type Result<T> = std::result::Result<T, AvcError>;

impl AvcError {
    /// True for errors the top-level dispatcher should log and continue past,
    /// per spec.md §7's propagation policy (`UnsupportedFeature` and
    /// `InconsistentState` drop the current slice; the stream continues).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AvcError::UnsupportedFeature(_) | AvcError::InconsistentState(_)
        )
    }
}
