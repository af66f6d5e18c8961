use std::sync::Arc;

use studyforge_types::SessionLog;

use crate::error::Result;
use crate::keys;
use crate::store::{KeyValueStore, KeyValueStoreExt};

#[derive(Clone)]
pub struct SessionLogRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SessionLogRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Most recent first
    pub fn load(&self) -> Vec<SessionLog> {
        self.store.get_or_default(keys::SESSION_LOGS)
    }

    /// Prepends a completed session and returns the collection as written
    pub fn record(&self, log: SessionLog) -> Result<Vec<SessionLog>> {
        let mut logs = self.load();
        logs.insert(0, log);
        self.store.set_json(keys::SESSION_LOGS, &logs)?;
        Ok(logs)
    }
}
