use std::sync::Arc;

use crate::error::Result;
use crate::keys;
use crate::store::{KeyValueStore, KeyValueStoreExt};

/// Credential and user preferences
#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored credential, `None` when absent or blank
    pub fn credential(&self) -> Option<String> {
        let key: Option<String> = self.store.get_or(keys::API_KEY, None);
        key.filter(|k| !k.trim().is_empty())
    }

    pub fn set_credential(&self, credential: &str) -> Result<()> {
        self.store.set_json(keys::API_KEY, credential)
    }

    pub fn clear_credential(&self) -> Result<()> {
        self.store.remove(keys::API_KEY)
    }

    pub fn music_embed_url(&self) -> Option<String> {
        self.store.get_or(keys::MUSIC_EMBED_URL, None)
    }

    pub fn set_music_embed_url(&self, url: Option<&str>) -> Result<()> {
        match url {
            Some(url) => self.store.set_json(keys::MUSIC_EMBED_URL, url),
            None => self.store.remove(keys::MUSIC_EMBED_URL),
        }
    }
}
