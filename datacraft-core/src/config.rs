use crate::policy::Policy;
use serde::{Deserialize, Serialize};

/// 128 x 128 map pixels, one byte each.
pub const MAP_SIZE: usize = 128 * 128;
pub const DEFAULT_START_ID: u32 = 1_000_000;
pub const DATA_VERSION: i32 = 3465;
pub const ZERO_CHECK_WINDOW: usize = 1000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Bytes per map record.
    pub chunk_size: usize,
    pub default_start_id: u32,
    /// `DataVersion` stamped into every NBT file we write.
    pub data_version: i32,
    /// Leading bytes inspected for the blank-output warning.
    pub zero_check_window: usize,
    /// Transform chunks on the rayon pool.
    pub parallel: bool,
    /// When true, metadata timestamps are zeroed for reproducible output.
    pub deterministic: bool,
    pub policy: Policy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chunk_size: MAP_SIZE,
            default_start_id: DEFAULT_START_ID,
            data_version: DATA_VERSION,
            zero_check_window: ZERO_CHECK_WINDOW,
            parallel: true,
            deterministic: false,
            policy: Policy::default(),
        }
    }
}

impl Config {
    /// Config with a custom chunk size, mostly for tests.
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            chunk_size,
            ..Default::default()
        }
    }
}
