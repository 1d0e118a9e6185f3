use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::{MapRecord, RunMetadata};
use crate::error::Result;
use crate::repo::{IdCounter, MetaStore, RecordStore};

#[derive(Debug, Default)]
struct State {
    records: BTreeMap<u32, MapRecord>,
    metas: BTreeMap<u32, RunMetadata>,
    counter: Option<u32>,
}

/// Keeps a whole world in memory. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemWorldRepo {
    state: Mutex<State>,
}

impl MemWorldRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn record_count(&self) -> usize {
        self.state().records.len()
    }

    pub fn remove_record(&self, id: u32) -> Option<MapRecord> {
        self.state().records.remove(&id)
    }

    pub fn remove_meta(&self, start_id: u32) -> Option<RunMetadata> {
        self.state().metas.remove(&start_id)
    }
}

impl RecordStore for MemWorldRepo {
    fn load(&self, id: u32) -> Result<Option<MapRecord>> {
        Ok(self.state().records.get(&id).cloned())
    }

    fn save(&self, rec: &MapRecord) -> Result<()> {
        self.state().records.insert(rec.id, rec.clone());
        Ok(())
    }

    fn exists(&self, id: u32) -> Result<bool> {
        Ok(self.state().records.contains_key(&id))
    }
}

impl MetaStore for MemWorldRepo {
    fn load_meta(&self, start_id: u32) -> Result<Option<RunMetadata>> {
        Ok(self.state().metas.get(&start_id).cloned())
    }

    fn save_meta(&self, meta: &RunMetadata) -> Result<()> {
        self.state().metas.insert(meta.start_id, meta.clone());
        Ok(())
    }

    fn list_meta(&self) -> Result<Vec<RunMetadata>> {
        Ok(self.state().metas.values().cloned().collect())
    }
}

impl IdCounter for MemWorldRepo {
    fn read_counter(&self) -> Result<Option<u32>> {
        Ok(self.state().counter)
    }

    fn write_counter(&self, highest: u32) -> Result<()> {
        self.state().counter = Some(highest);
        Ok(())
    }
}
