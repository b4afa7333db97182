use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use crate::fs::operations::{write_atomically, DocumentLock};

use super::StoreError;

pub type RecordId = u64;

/// Anything that can be kept inside a [RecordStore]. The record carries its own ID, which must
/// match the key it's stored under.
pub trait Record: Serialize + DeserializeOwned + Clone {
    fn id(&self) -> RecordId;
}

/// ID keyed collection of records backed by a JSON document.
///
/// Opening a store takes an exclusive lock on the document which is held until the store is
/// dropped, so concurrent invocations run one after another instead of overwriting each other.
pub struct RecordStore<R> {
    path: PathBuf,
    records: BTreeMap<RecordId, R>,
    /// Highest ID seen since the store was opened. Keeps IDs of records deleted through this
    /// instance from being handed out again.
    highest_id: RecordId,
    _lock: DocumentLock,
}

impl<R: Record> RecordStore<R> {
    /// Opens the document at `path`. A missing document is created empty, an empty file is
    /// treated as an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let lock = DocumentLock::acquire(&path)?;

        let records = match fs::read_to_string(&path) {
            Ok(content) => parse_document(&path, &content)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Creating empty document {path:?}");
                write_atomically(&path, b"{}")?;
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Loaded {} records from {path:?}", records.len());

        let highest_id = records.keys().next_back().copied().unwrap_or(0);
        Ok(Self {
            path,
            records,
            highest_id,
            _lock: lock,
        })
    }

    /// The ID the next inserted record will receive: one past the largest ID currently in the
    /// store, or 1 for an empty store.
    pub fn next_id(&self) -> RecordId {
        let current_max = self.records.keys().next_back().copied().unwrap_or(0);
        current_max.max(self.highest_id) + 1
    }

    pub fn get(&self, id: RecordId) -> Option<&R> {
        self.records.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.values()
    }

    /// Builds a record for the next free ID, stores it and persists the document.
    pub fn insert_with(&mut self, build: impl FnOnce(RecordId) -> R) -> Result<RecordId, StoreError> {
        let id = self.next_id();
        let record = build(id);
        debug_assert_eq!(record.id(), id);

        self.records.insert(id, record);
        if let Err(e) = self.persist() {
            self.records.remove(&id);
            return Err(e);
        }
        self.highest_id = id;
        info!("Inserted record {id} into {:?}", self.path);
        Ok(id)
    }

    /// Applies `change` to a copy of the record and persists the result. When `change` or the
    /// write fails, the store keeps the previous version.
    pub fn update(
        &mut self,
        id: RecordId,
        change: impl FnOnce(&mut R) -> Result<(), StoreError>,
    ) -> Result<&R, StoreError> {
        let current = self.records.get(&id).ok_or(StoreError::NotFound(id))?;
        let mut updated = current.clone();
        change(&mut updated)?;

        let previous = self.records.insert(id, updated);
        if let Err(e) = self.persist() {
            if let Some(previous) = previous {
                self.records.insert(id, previous);
            }
            return Err(e);
        }
        info!("Updated record {id} in {:?}", self.path);
        self.records.get(&id).ok_or(StoreError::NotFound(id))
    }

    pub fn remove(&mut self, id: RecordId) -> Result<R, StoreError> {
        let removed = self.records.remove(&id).ok_or(StoreError::NotFound(id))?;
        if let Err(e) = self.persist() {
            self.records.insert(id, removed);
            return Err(e);
        }
        info!("Removed record {id} from {:?}", self.path);
        Ok(removed)
    }

    /// Rewrites the whole document from memory.
    pub fn persist(&self) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(&self.records).map_err(std::io::Error::from)?;
        write_atomically(&self.path, &data)?;
        debug!("Persisted {} records into {:?}", self.records.len(), self.path);
        Ok(())
    }
}

fn parse_document<R: Record>(
    path: &Path,
    content: &str,
) -> Result<BTreeMap<RecordId, R>, StoreError> {
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let corrupt = |reason: String| StoreError::CorruptStore {
        path: path.to_owned(),
        reason,
    };

    // serde_json reads the string keys of the object straight into integers.
    let records: BTreeMap<RecordId, R> =
        serde_json::from_str(content).map_err(|e| corrupt(e.to_string()))?;

    for (key, record) in &records {
        if *key == 0 {
            return Err(corrupt("record ID 0 is not allowed".into()));
        }
        if record.id() != *key {
            return Err(corrupt(format!(
                "record stored under {key} has ID {}",
                record.id()
            )));
        }
    }
    Ok(records)
}
