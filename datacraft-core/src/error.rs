use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataCraftError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("File not found: {}", .0.display())]
    MissingInput(PathBuf),

    #[error("World not found: {}", .0.display())]
    MissingDestination(PathBuf),

    #[error("input is {size} bytes, limit is {limit} bytes")]
    OversizeInput { size: u64, limit: u64 },

    #[error("Map not found: map_{id}.dat")]
    MissingRecord { id: u32 },

    #[error("no metadata for run starting at {start_id}")]
    MissingMetadata { start_id: u32 },

    #[error("map id {id} is already taken")]
    IdCollision { id: u32 },

    #[error("{count} maps starting at {start_id} overflow the map id space")]
    IdRangeOverflow { start_id: u32, count: u64 },

    #[error("chunk is {len} bytes, max is {max}")]
    ChunkTooLarge { len: usize, max: usize },

    #[error("map_{id}.dat holds {len} colors, expected {expected}")]
    BadRecordLength { id: u32, len: usize, expected: usize },

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, DataCraftError>;

/// Non-fatal conditions raised while decoding. The run still succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// No metadata for the run; padding stays in the output.
    MissingMetadata { start_id: u32 },
    /// The first bytes of the output are all zero.
    SuspiciousOutput { window: usize },
    ChecksumMismatch { expected: String, actual: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::MissingMetadata { start_id } => write!(
                f,
                "no metadata found for run {start_id}; file may have padding"
            ),
            Warning::SuspiciousOutput { window } => write!(
                f,
                "first {window} bytes are zero; file appears to be blank/corrupted"
            ),
            Warning::ChecksumMismatch { expected, actual } => {
                write!(f, "blake3 mismatch: metadata={expected} decoded={actual}")
            }
        }
    }
}
