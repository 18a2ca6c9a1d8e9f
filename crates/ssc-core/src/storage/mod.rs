//! Storage abstraction for testability.
//!
//! The writers never touch `std::fs` directly; they go through `FileStore`
//! so tests can observe ordering and inject open/flush failures.

mod disk;

// In-memory store for testing (always available for unit and integration tests)
#[doc(hidden)]
pub mod mock;

pub use disk::{DiskFile, DiskStore};
#[doc(hidden)]
pub use mock::{MemoryFile, MemoryStore};

use std::path::Path;

use crate::config::format::LINE_ENDING;
use crate::error::Result;

/// How a file is opened for writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Data must reach the disk before `flush` returns.
    Durable,
    /// Derived data that can be regenerated; favour speed.
    Fast,
}

/// A file opened for writing.
pub trait StoreFile {
    fn write_str(&mut self, text: &str) -> Result<()>;

    /// Write `text` followed by the SSC line terminator.
    fn put_line(&mut self, text: &str) -> Result<()> {
        self.write_str(text)?;
        self.write_str(LINE_ENDING)
    }

    fn flush(&mut self) -> Result<()>;
}

/// Trait for opening, probing and removing files.
pub trait FileStore {
    /// The type of file handle returned by this store.
    type File: StoreFile;

    /// Open `path` for writing, truncating any existing content.
    fn open(&self, path: &Path, mode: OpenMode) -> Result<Self::File>;

    fn exists(&self, path: &Path) -> bool;

    fn remove(&self, path: &Path) -> Result<()>;
}
