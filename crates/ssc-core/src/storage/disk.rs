use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::{FileStore, OpenMode, StoreFile};
use crate::error::Result;

/// `FileStore` backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskStore;

impl DiskStore {
    pub fn new() -> Self {
        Self
    }
}

pub struct DiskFile {
    writer: BufWriter<File>,
    mode: OpenMode,
}

impl StoreFile for DiskFile {
    fn write_str(&mut self, text: &str) -> Result<()> {
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        if self.mode == OpenMode::Durable {
            self.writer.get_ref().sync_all()?;
        }
        Ok(())
    }
}

impl FileStore for DiskStore {
    type File = DiskFile;

    fn open(&self, path: &Path, mode: OpenMode) -> Result<DiskFile> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        debug!("Opening {:?} for writing ({:?})", path, mode);
        let file = File::create(path)?;
        Ok(DiskFile {
            writer: BufWriter::new(file),
            mode,
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove(&self, path: &Path) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }
}
