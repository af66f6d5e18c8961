use std::sync::Arc;

use crate::error::Result;
use crate::keys;
use crate::models::DailyTip;
use crate::store::{KeyValueStore, KeyValueStoreExt};

#[derive(Clone)]
pub struct DailyTipRepository {
    store: Arc<dyn KeyValueStore>,
}

impl DailyTipRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn load(&self) -> Option<DailyTip> {
        self.store.get_or(keys::DAILY_TIP, None)
    }

    pub fn save(&self, tip: &DailyTip) -> Result<()> {
        self.store.set_json(keys::DAILY_TIP, tip)
    }
}
