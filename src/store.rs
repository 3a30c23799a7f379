use crate::aggregate::AggregateResults;
use crate::batch::BatchResult;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const AGGREGATE_FILE: &str = "aggregate_results.json";
const EXTENSION: &str = "json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unreadable record {name}: {reason}")]
    Unreadable { name: String, reason: String },
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode {name}: {source}")]
    Encode {
        name: String,
        source: serde_json::Error,
    },
}

/// Where batch records and the aggregate live between runs.
pub trait ResultStore {
    /// Names of every stored batch record, in the order they should be folded.
    fn list_batches(&self) -> Result<Vec<String>, StoreError>;
    fn load_batch(&self, name: &str) -> Result<BatchResult, StoreError>;
    /// Stores a batch under its conventional name and returns that name.
    fn save_batch(&mut self, batch: &BatchResult) -> Result<String, StoreError>;
    fn load_aggregate(&self) -> Result<AggregateResults, StoreError>;
    fn save_aggregate(&mut self, results: &AggregateResults) -> Result<(), StoreError>;
}

fn unreadable(name: &str, reason: impl ToString) -> StoreError {
    StoreError::Unreadable {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

fn decode_batch(name: &str, text: &str) -> Result<BatchResult, StoreError> {
    let batch: BatchResult = serde_json::from_str(text).map_err(|e| unreadable(name, e))?;
    batch.check().map_err(|reason| unreadable(name, reason))?;
    Ok(batch)
}

fn encode<T: serde::Serialize>(name: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|source| StoreError::Encode {
        name: name.to_string(),
        source,
    })
}

/// One JSON file per batch in a directory, named `<strategy_1>-<strategy_2>.json`.
#[derive(Clone, Debug)]
pub struct JsonDirStore {
    dir: PathBuf,
    aggregate_path: PathBuf,
}

impl JsonDirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let aggregate_path = dir.join(AGGREGATE_FILE);
        JsonDirStore {
            dir,
            aggregate_path,
        }
    }

    pub fn with_aggregate_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.aggregate_path = path.into();
        self
    }

    fn batch_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{EXTENSION}"))
    }

    fn is_aggregate(&self, path: &Path) -> bool {
        path.file_name() == self.aggregate_path.file_name()
    }
}

impl ResultStore for JsonDirStore {
    fn list_batches(&self) -> Result<Vec<String>, StoreError> {
        let io = |source| StoreError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.dir).map_err(io)? {
            let path = entry.map_err(io)?.path();
            if !path.is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION)
                || self.is_aggregate(&path)
            {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    fn load_batch(&self, name: &str) -> Result<BatchResult, StoreError> {
        let text =
            std::fs::read_to_string(self.batch_path(name)).map_err(|e| unreadable(name, e))?;
        decode_batch(name, &text)
    }

    fn save_batch(&mut self, batch: &BatchResult) -> Result<String, StoreError> {
        let name = batch.stem();
        let text = encode(&name, batch)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.batch_path(&name);
        std::fs::write(&path, text).map_err(|source| StoreError::Io { path, source })?;
        Ok(name)
    }

    fn load_aggregate(&self) -> Result<AggregateResults, StoreError> {
        let name = self.aggregate_path.display().to_string();
        let text =
            std::fs::read_to_string(&self.aggregate_path).map_err(|e| unreadable(&name, e))?;
        serde_json::from_str(&text).map_err(|e| unreadable(&name, e))
    }

    fn save_aggregate(&mut self, results: &AggregateResults) -> Result<(), StoreError> {
        let text = encode(AGGREGATE_FILE, results)?;
        let parent = self
            .aggregate_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty());
        if let Some(parent) = parent {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.aggregate_path, text).map_err(|source| StoreError::Io {
            path: self.aggregate_path.clone(),
            source,
        })?;
        log::info!(
            "wrote {} aggregate records to {}",
            results.len(),
            self.aggregate_path.display()
        );
        Ok(())
    }
}

/// Serialized records held in memory, decoded on load like the directory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    batches: BTreeMap<String, String>,
    aggregate: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw record text under `name` without checking it.
    pub fn insert_raw(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.batches.insert(name.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

impl ResultStore for MemoryStore {
    fn list_batches(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.batches.keys().cloned().collect())
    }

    fn load_batch(&self, name: &str) -> Result<BatchResult, StoreError> {
        let text = self
            .batches
            .get(name)
            .ok_or_else(|| unreadable(name, "no such record"))?;
        decode_batch(name, text)
    }

    fn save_batch(&mut self, batch: &BatchResult) -> Result<String, StoreError> {
        let name = batch.stem();
        let text = encode(&name, batch)?;
        self.batches.insert(name.clone(), text);
        Ok(name)
    }

    fn load_aggregate(&self) -> Result<AggregateResults, StoreError> {
        let text = self
            .aggregate
            .as_deref()
            .ok_or_else(|| unreadable(AGGREGATE_FILE, "no aggregate stored"))?;
        serde_json::from_str(text).map_err(|e| unreadable(AGGREGATE_FILE, e))
    }

    fn save_aggregate(&mut self, results: &AggregateResults) -> Result<(), StoreError> {
        self.aggregate = Some(encode(AGGREGATE_FILE, results)?);
        Ok(())
    }
}
