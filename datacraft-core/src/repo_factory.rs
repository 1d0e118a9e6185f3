use crate::error::Result;
use crate::repo::{OpenParams, WorldRepo};
use crate::repo_fs::FsWorldRepo;
use crate::repo_mem::MemWorldRepo;

pub enum Backend {
    Fs,
    /// Ignores the path; nothing touches disk.
    Mem,
}

pub fn open_repo(backend: Backend, p: OpenParams) -> Result<Box<dyn WorldRepo>> {
    match backend {
        Backend::Fs => Ok(Box::new(FsWorldRepo::new(p)?)),
        Backend::Mem => Ok(Box::new(MemWorldRepo::new())),
    }
}
