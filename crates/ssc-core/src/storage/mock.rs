//! In-memory file store for testing
//!
//! Keeps file contents in a shared map and records every operation so tests
//! can check ordering (e.g. that an old edit file is removed only after the
//! new one was flushed). Open, write and flush failures can be injected per
//! path.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::{FileStore, OpenMode, StoreFile};
use crate::error::Result;

/// Operation recorded by `MemoryStore`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Open(PathBuf, OpenMode),
    Flush(PathBuf),
    Remove(PathBuf),
}

#[derive(Debug, Default)]
struct Inner {
    files: BTreeMap<PathBuf, String>,
    ops: Vec<StoreOp>,
    fail_open: HashSet<PathBuf>,
    fail_write: HashSet<PathBuf>,
    fail_flush: HashSet<PathBuf>,
}

/// Mock store; clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file with existing content
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.inner
            .borrow_mut()
            .files
            .insert(path.into(), content.into());
        self
    }

    pub fn fail_open(self, path: impl Into<PathBuf>) -> Self {
        self.inner.borrow_mut().fail_open.insert(path.into());
        self
    }

    pub fn fail_write(self, path: impl Into<PathBuf>) -> Self {
        self.inner.borrow_mut().fail_write.insert(path.into());
        self
    }

    pub fn fail_flush(self, path: impl Into<PathBuf>) -> Self {
        self.inner.borrow_mut().fail_flush.insert(path.into());
        self
    }

    /// Current content of a file
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.inner.borrow().files.get(path.as_ref()).cloned()
    }

    /// All operations performed so far, in order
    pub fn ops(&self) -> Vec<StoreOp> {
        self.inner.borrow().ops.clone()
    }
}

pub struct MemoryFile {
    path: PathBuf,
    inner: Rc<RefCell<Inner>>,
}

impl StoreFile for MemoryFile {
    fn write_str(&mut self, text: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_write.contains(&self.path) {
            return Err(io::Error::new(io::ErrorKind::StorageFull, "No space left on device").into());
        }
        inner
            .files
            .entry(self.path.clone())
            .or_default()
            .push_str(text);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_flush.contains(&self.path) {
            return Err(io::Error::new(io::ErrorKind::StorageFull, "No space left on device").into());
        }
        inner.ops.push(StoreOp::Flush(self.path.clone()));
        Ok(())
    }
}

impl FileStore for MemoryStore {
    type File = MemoryFile;

    fn open(&self, path: &Path, mode: OpenMode) -> Result<MemoryFile> {
        let mut inner = self.inner.borrow_mut();
        if inner.fail_open.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "Permission denied").into());
        }
        inner.ops.push(StoreOp::Open(path.to_path_buf(), mode));
        inner.files.insert(path.to_path_buf(), String::new());
        Ok(MemoryFile {
            path: path.to_path_buf(),
            inner: Rc::clone(&self.inner),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.borrow().files.contains_key(path)
    }

    fn remove(&self, path: &Path) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.ops.push(StoreOp::Remove(path.to_path_buf()));
        match inner.files.remove(path) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(io::ErrorKind::NotFound, "No such file").into()),
        }
    }
}
