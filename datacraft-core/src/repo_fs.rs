use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::container::{idcounts, map_file, meta};
use crate::domain::{MapRecord, RunMetadata};
use crate::error::{DataCraftError, Result};
use crate::list::scan_meta_dir;
use crate::repo::{IdCounter, MetaStore, OpenParams, RecordStore};

/// A world save folder; everything lives under `<world>/data`.
pub struct FsWorldRepo {
    data_dir: PathBuf,
    data_version: i32,
}

impl FsWorldRepo {
    pub fn new(params: OpenParams) -> Result<Self> {
        if !params.world_path.is_dir() {
            return Err(DataCraftError::MissingDestination(params.world_path));
        }
        let data_dir = params.world_path.join("data");
        if params.create {
            fs::create_dir_all(&data_dir)?;
        } else if !data_dir.is_dir() {
            return Err(DataCraftError::MissingDestination(data_dir));
        }
        Ok(Self {
            data_dir,
            data_version: params.data_version,
        })
    }

    pub fn record_path(&self, id: u32) -> PathBuf {
        self.data_dir.join(map_file::file_name(id))
    }

    pub fn meta_path(&self, start_id: u32) -> PathBuf {
        self.data_dir.join(meta::file_name(start_id))
    }

    fn create(&self, path: &Path) -> Result<BufWriter<File>> {
        Ok(BufWriter::new(File::create(path)?))
    }
}

/// `Ok(None)` when the file does not exist.
fn open_if_exists(path: &Path) -> Result<Option<BufReader<File>>> {
    match File::open(path) {
        Ok(f) => Ok(Some(BufReader::new(f))),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl RecordStore for FsWorldRepo {
    fn load(&self, id: u32) -> Result<Option<MapRecord>> {
        match open_if_exists(&self.record_path(id))? {
            Some(r) => Ok(Some(map_file::read_from(r, id)?)),
            None => Ok(None),
        }
    }

    fn save(&self, rec: &MapRecord) -> Result<()> {
        let mut w = self.create(&self.record_path(rec.id))?;
        map_file::write_to(&mut w, rec, self.data_version)?;
        w.flush()?;
        Ok(())
    }

    fn exists(&self, id: u32) -> Result<bool> {
        Ok(self.record_path(id).is_file())
    }
}

impl MetaStore for FsWorldRepo {
    fn load_meta(&self, start_id: u32) -> Result<Option<RunMetadata>> {
        let path = self.meta_path(start_id);
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        meta::parse(&text, start_id).map(Some)
    }

    fn save_meta(&self, m: &RunMetadata) -> Result<()> {
        let mut w = self.create(&self.meta_path(m.start_id))?;
        meta::write_to(&mut w, m)?;
        w.flush()?;
        Ok(())
    }

    fn list_meta(&self) -> Result<Vec<RunMetadata>> {
        scan_meta_dir(&self.data_dir)
    }
}

impl IdCounter for FsWorldRepo {
    fn read_counter(&self) -> Result<Option<u32>> {
        match open_if_exists(&self.data_dir.join(idcounts::FILE_NAME))? {
            Some(r) => Ok(Some(idcounts::read_from(r)?)),
            None => Ok(None),
        }
    }

    fn write_counter(&self, highest: u32) -> Result<()> {
        let mut w = self.create(&self.data_dir.join(idcounts::FILE_NAME))?;
        idcounts::write_to(&mut w, highest, self.data_version)?;
        w.flush()?;
        Ok(())
    }
}
