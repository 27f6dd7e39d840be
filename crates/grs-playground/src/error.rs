//! Error types shared by the playground pipeline.

use crate::refresh::TextVersion;
use std::fmt;
use thiserror::Error;

/// Why a byte offset was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetFault {
    /// The offset lies past the end of the UTF-8 text.
    OutOfBounds,
    /// The offset falls inside a multi-byte character.
    MidCharacter,
    /// A range whose start lies after its end.
    Reversed,
}

impl fmt::Display for OffsetFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => f.write_str("out of bounds"),
            Self::MidCharacter => f.write_str("not on a character boundary"),
            Self::Reversed => f.write_str("range start after range end"),
        }
    }
}

#[derive(Debug, Error)]
/// Errors produced by the offset converter, the renderers and the refresh controller.
pub enum PlaygroundError {
    #[error("invalid byte offset {offset} for text of {len} bytes: {fault}")]
    /// A byte offset (or range) the analysis engine produced does not fit the text.
    InvalidOffset {
        /// The offending byte offset.
        offset: usize,
        /// Byte length of the text it was checked against.
        len: usize,
        /// What is wrong with it.
        fault: OffsetFault,
    },

    #[error("malformed settings JSON: {0}")]
    /// User settings could not be parsed.
    ConfigParse(#[from] serde_json::Error),

    #[error("stale analysis result for version {version} (latest requested: {latest})")]
    /// An analysis result arrived after a newer version was requested.
    StaleResult {
        /// The version the result was computed for.
        version: TextVersion,
        /// The most recently requested version.
        latest: TextVersion,
    },
}

impl PlaygroundError {
    pub(crate) fn invalid_offset(offset: usize, len: usize, fault: OffsetFault) -> Self {
        Self::InvalidOffset { offset, len, fault }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, PlaygroundError>;
