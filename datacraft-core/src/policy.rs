use serde::{Deserialize, Serialize};

/// How strictly the codec treats chunks and records of the wrong size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validation {
    /// Truncate oversize chunks, pass color arrays of any length through.
    #[default]
    Lenient,
    /// Reject oversize chunks and records whose color array is not one chunk long.
    Strict,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Policy {
    /// Refuse inputs larger than this many bytes.
    pub max_input_size: Option<u64>,
    pub validation: Validation,
    /// Refuse to encode over map ids that already have a record.
    pub check_collisions: bool,
}
