use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::client::PersistClient;
use crate::dbs::{FileStore, MemoryStore};
use crate::error::{PersistError, Result};
use crate::store::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = PersistError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(PersistError::Internal(format!(
                "Unknown storage backend: {}",
                other
            ))),
        }
    }
}

pub struct PersistClientBuilder {
    backend: StorageBackend,
    data_dir: Option<PathBuf>,
    store: Option<Arc<dyn KeyValueStore>>,
}

impl PersistClientBuilder {
    pub fn new() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: None,
            store: None,
        }
    }

    pub fn backend(mut self, backend: StorageBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Use an existing store, ignoring backend and data dir
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<PersistClient> {
        let store: Arc<dyn KeyValueStore> = match (self.store, self.backend) {
            (Some(store), _) => store,
            (None, StorageBackend::Memory) => Arc::new(MemoryStore::new()),
            (None, StorageBackend::File) => {
                let dir = self
                    .data_dir
                    .ok_or_else(|| PersistError::Internal("data_dir is required".to_string()))?;
                Arc::new(FileStore::open(dir)?)
            }
        };
        Ok(PersistClient::new(store))
    }
}

impl Default for PersistClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
