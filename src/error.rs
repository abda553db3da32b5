//! Error types for encoding and readback

use crate::encoder::modes::Mode;
use crate::models::{ECLevel, Version};

/// Errors returned when a payload cannot become a symbol
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QrError {
    /// The input holds a byte the requested mode cannot represent
    #[error("{mode} mode cannot encode byte 0x{byte:02X} at index {index}")]
    Encoding {
        /// Mode the caller asked for
        mode: Mode,
        /// Byte offset of the first offending symbol
        index: usize,
        /// The offending byte
        byte: u8,
    },

    /// Even the largest allowed version cannot hold the data at this level
    #[error(
        "data needs {required_bits} bits but version {version} at level {level} holds {capacity_bits}"
    )]
    CapacityExceeded {
        /// Bits needed including headers, terminator and byte alignment
        required_bits: usize,
        /// Data capacity of `version` at `level`, in bits
        capacity_bits: usize,
        /// Largest version that was tried
        version: Version,
        /// Requested error correction level
        level: ECLevel,
    },

    /// `min_version` is greater than `max_version`
    #[error("empty version range {min}..={max}")]
    InvalidVersionRange {
        /// Lower bound
        min: Version,
        /// Upper bound
        max: Version,
    },
}

/// Errors returned when reading a finished matrix back
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    /// The matrix is not a square of a valid QR side length
    #[error("{width}x{height} is not a QR symbol size")]
    InvalidDimension {
        /// Matrix width
        width: usize,
        /// Matrix height
        height: usize,
    },

    /// Neither format information copy is within correction distance
    #[error("format information unreadable")]
    FormatUnreadable,

    /// Version information disagrees with the symbol size
    #[error("version information says {found:?}, size implies {expected}")]
    VersionMismatch {
        /// Version implied by the side length
        expected: Version,
        /// Decoded version information, if any copy was readable
        found: Option<Version>,
    },

    /// A Reed-Solomon block has more errors than it can correct
    #[error("block {block} is uncorrectable")]
    Uncorrectable {
        /// Index of the failing block
        block: usize,
    },

    /// Corrected data does not parse as a segment sequence
    #[error("malformed payload: {0}")]
    MalformedPayload(&'static str),
}

/// Result alias for encoding operations
pub type Result<T> = std::result::Result<T, QrError>;
