use std::sync::Arc;

use studyforge_types::ChatMessage;

use crate::error::Result;
use crate::keys;
use crate::store::{KeyValueStore, KeyValueStoreExt};

#[derive(Clone)]
pub struct ChatHistoryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl ChatHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Vec<ChatMessage> {
        self.store.get_or_default(keys::CHAT_HISTORY)
    }

    pub fn save(&self, history: &[ChatMessage]) -> Result<()> {
        self.store.set_json(keys::CHAT_HISTORY, history)
    }
}
