#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod policy;

pub mod util {
    pub mod hash_forward;
    pub mod hex;
}

pub mod codec;

pub mod container {
    pub mod idcounts;
    pub mod map_file;
    pub mod meta;
    pub mod nbt;
}

pub mod domain;
pub mod progress;

pub mod pack {
    pub mod writer;
}

pub mod read {
    pub mod extract;
}

pub mod list;
pub mod repo;
pub mod repo_factory;
pub mod repo_fs;
pub mod repo_mem;

// Re-exports: stable API surface
pub use config::Config;
pub use domain::{MapRecord, RunMetadata};
pub use error::{DataCraftError, Result, Warning};
pub use pack::writer::{EncodedRun, encode, encode_file};
pub use read::extract::{Decoded, decode, decode_to_file, verify};
