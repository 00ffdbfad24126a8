//! Region origin cache: an in-memory map loaded once per run and written
//! through to a [`CacheBackend`] on every new entry.
//!
//! The file backend assumes a single writer. Running two batches against the
//! same cache file at once can lose entries.

use crate::error::Result;
use crate::json_file;
use crate::types::AreaOrigin;
use indexmap::IndexMap;
use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use tracing::{debug, info};

/// Decoded region name → `[origin_x, origin_y]`, in insertion order.
pub type OriginMap = IndexMap<String, [i64; 2]>;

pub trait CacheBackend {
    fn load(&self) -> Result<OriginMap>;
    fn persist(&self, entries: &OriginMap) -> Result<()>;
}

impl<B: CacheBackend + ?Sized> CacheBackend for &B {
    fn load(&self) -> Result<OriginMap> {
        (**self).load()
    }

    fn persist(&self, entries: &OriginMap) -> Result<()> {
        (**self).persist(entries)
    }
}

/// Pretty-printed JSON object on disk. A missing file loads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CacheBackend for JsonFileBackend {
    fn load(&self) -> Result<OriginMap> {
        let entries = json_file::read(&self.path)?.unwrap_or_default();
        Ok(entries)
    }

    fn persist(&self, entries: &OriginMap) -> Result<()> {
        json_file::write_pretty(&self.path, entries)
    }
}

/// Non-persistent backend that records how often it was written.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    stored: RefCell<OriginMap>,
    writes: Cell<usize>,
}

impl MemoryBackend {
    pub fn with_entries(entries: OriginMap) -> Self {
        Self {
            stored: RefCell::new(entries),
            writes: Cell::new(0),
        }
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn stored(&self) -> OriginMap {
        self.stored.borrow().clone()
    }
}

impl CacheBackend for MemoryBackend {
    fn load(&self) -> Result<OriginMap> {
        Ok(self.stored.borrow().clone())
    }

    fn persist(&self, entries: &OriginMap) -> Result<()> {
        *self.stored.borrow_mut() = entries.clone();
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

pub struct RegionCache<B: CacheBackend> {
    backend: B,
    entries: OriginMap,
}

impl<B: CacheBackend> RegionCache<B> {
    pub fn load(backend: B) -> Result<Self> {
        let entries = backend.load()?;
        info!("Loaded {} cached region(s)", entries.len());
        Ok(Self { backend, entries })
    }

    pub fn get(&self, area_name: &str) -> Option<AreaOrigin> {
        self.entries.get(area_name).copied().map(AreaOrigin::from)
    }

    pub fn contains(&self, area_name: &str) -> bool {
        self.entries.contains_key(area_name)
    }

    /// Adds a new region and flushes the whole map. Existing entries are
    /// never replaced; inserting a known region is a no-op without a write.
    pub fn insert(&mut self, area_name: &str, origin: AreaOrigin) -> Result<()> {
        if self.entries.contains_key(area_name) {
            return Ok(());
        }

        self.entries.insert(area_name.to_string(), origin.into());
        if let Err(e) = self.backend.persist(&self.entries) {
            self.entries.pop();
            return Err(e);
        }
        debug!(
            "Cached region '{}' at ({}, {}), {} entries flushed",
            area_name,
            origin.x,
            origin.y,
            self.entries.len()
        );

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
