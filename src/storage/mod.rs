//! Storage layer for scriber-register
//!
//! Provides a local key/value store backed by a JSON file with atomic
//! writes.

pub mod local;

pub use local::{FileStore, LocalStore, MemoryStore};

use crate::config::paths::RegisterPaths;
use crate::error::RegisterError;

/// Open the file-backed local store under the data directory
pub fn open_local_store(paths: &RegisterPaths) -> Result<FileStore, RegisterError> {
    paths.ensure_directories()?;
    Ok(FileStore::new(paths.local_store_file()))
}
