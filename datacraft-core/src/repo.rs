// datacraft_core/src/repo.rs
use crate::domain::{MapRecord, RunMetadata};
use crate::error::Result;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct OpenParams {
    pub world_path: PathBuf,
    pub data_version: i32,
    /// Create `<world>/data` if it does not exist yet.
    pub create: bool,
}

/// Map records keyed by id.
pub trait RecordStore: Send + Sync {
    fn load(&self, id: u32) -> Result<Option<MapRecord>>;

    fn save(&self, rec: &MapRecord) -> Result<()>;

    fn exists(&self, id: u32) -> Result<bool>;
}

/// Run metadata keyed by start id.
pub trait MetaStore: Send + Sync {
    fn load_meta(&self, start_id: u32) -> Result<Option<RunMetadata>>;

    fn save_meta(&self, meta: &RunMetadata) -> Result<()>;

    /// All runs, ordered by start id.
    fn list_meta(&self) -> Result<Vec<RunMetadata>>;
}

/// The world's highest assigned map id.
pub trait IdCounter: Send + Sync {
    fn read_counter(&self) -> Result<Option<u32>>;

    fn write_counter(&self, highest: u32) -> Result<()>;

    /// Raise the counter to `highest`; never lowers it.
    fn bump_counter(&self, highest: u32) -> Result<u32> {
        let next = match self.read_counter()? {
            Some(cur) if cur >= highest => return Ok(cur),
            _ => highest,
        };
        self.write_counter(next)?;
        Ok(next)
    }
}

pub trait WorldRepo: RecordStore + MetaStore + IdCounter {}

impl<T: RecordStore + MetaStore + IdCounter> WorldRepo for T {}
