//! The persistence medium behind the record store: an opaque key-value
//! blob store. The business logic only ever sees `get`/`set`, so the file
//! backing can be swapped out without touching it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::rc::Rc;

use lz4_flex::frame::{FrameDecoder, FrameEncoder};
use tracing::debug;

use crate::errors::SpendlogError;

pub trait BlobStore: std::fmt::Debug {
    /// Returns the stored bytes for `key`, or `None` if nothing was ever
    /// written under it.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SpendlogError>;
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), SpendlogError>;
}

/// One lz4-framed file per key under a base directory.
#[derive(Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.spendlog"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SpendlogError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(&path)?;
        let mut reader = FrameDecoder::new(BufReader::new(file));
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        debug!(key, len = bytes.len(), "read blob");
        Ok(Some(bytes))
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), SpendlogError> {
        fs::create_dir_all(&self.base)?;
        let file = File::create(self.path_for(key))?;
        let mut writer = FrameEncoder::new(BufWriter::new(file));
        writer.write_all(value)?;
        let mut inner = writer.finish()?;
        inner.flush()?;
        debug!(key, len = value.len(), "wrote blob");
        Ok(())
    }
}

/// In-memory backing, used by tests and anywhere persistence across runs
/// is not wanted. Clones share the same underlying map, so a test can keep
/// a handle and inspect what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored bytes, bypassing the `BlobStore` interface.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.borrow().get(key).cloned()
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, SpendlogError> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), SpendlogError> {
        self.blobs.borrow_mut().insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
