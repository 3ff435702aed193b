//! Persistent cache of resolved POI names, keyed by route identifier.
//!
//! The file is a JSON object mapping route id to an ordered list of names.
//! It is loaded once when the cache is opened and rewritten after every
//! change. Writes go to a temp file in the same directory which is then
//! renamed over the cache file, so a crash never leaves a half-written
//! cache behind.
//!
//! Before each write the file is re-read and entries written by other
//! processes are merged in. Per key, the last writer wins.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::CacheError;

type Entries = BTreeMap<String, Vec<String>>;

/// Route id to POI names, loaded once and written through on every change.
///
/// Entries are never expired; `invalidate` is the only way to drop one.
#[derive(Debug, Default)]
pub struct SummaryCache {
    path: Option<PathBuf>,
    entries: Entries,
    invalidated: BTreeSet<String>,
}

impl SummaryCache {
    /// Opens the cache at `path`.
    ///
    /// A missing file gives an empty cache. A file that is not valid JSON is
    /// logged and treated as empty; it is replaced on the next write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let path = path.into();
        let entries = read_entries(&path)?;
        tracing::info!(path = %path.display(), entries = entries.len(), "loaded POI cache");

        Ok(Self {
            path: Some(path),
            entries,
            invalidated: BTreeSet::new(),
        })
    }

    /// A cache that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Backing file, `None` for an in-memory cache.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Cached names for `route_id`, in resolution order.
    pub fn get(&self, route_id: &str) -> Option<&[String]> {
        self.entries.get(route_id).map(Vec::as_slice)
    }

    /// Stores `names` for `route_id` and flushes.
    ///
    /// The in-memory entry is kept even when the flush fails.
    pub fn put(&mut self, route_id: &str, names: Vec<String>) -> Result<(), CacheError> {
        self.invalidated.remove(route_id);
        self.entries.insert(route_id.to_string(), names);
        self.flush()
    }

    /// Drops the entry for `route_id`, returning whether one existed.
    pub fn invalidate(&mut self, route_id: &str) -> Result<bool, CacheError> {
        let existed = self.entries.remove(route_id).is_some();
        self.invalidated.insert(route_id.to_string());
        self.flush()?;
        Ok(existed)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn flush(&mut self) -> Result<(), CacheError> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };

        let mut merged = read_entries(&path)?;
        for route_id in &self.invalidated {
            merged.remove(route_id);
        }
        merged.extend(self.entries.iter().map(|(k, v)| (k.clone(), v.clone())));

        write_atomically(&path, &merged)?;
        tracing::debug!(path = %path.display(), entries = merged.len(), "flushed POI cache");
        self.entries = merged;
        self.invalidated.clear();
        Ok(())
    }
}

fn read_entries(path: &Path) -> Result<Entries, CacheError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_str(&data) {
        Ok(entries) => Ok(entries),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable POI cache");
            Ok(Entries::new())
        }
    }
}

fn write_atomically(path: &Path, entries: &Entries) -> Result<(), CacheError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}
