use std::sync::Arc;

use crate::error::Result;
use crate::keys;
use crate::repositories::{
    ChatHistoryRepository, DailyTipRepository, NoteRepository, SessionLogRepository,
    SettingsRepository, StudyPlanRepository,
};
use crate::store::KeyValueStore;

/// Entry point to every persisted collection, all sharing one store
#[derive(Clone)]
pub struct PersistClient {
    store: Arc<dyn KeyValueStore>,
    notes: NoteRepository,
    sessions: SessionLogRepository,
    chat: ChatHistoryRepository,
    plan: StudyPlanRepository,
    settings: SettingsRepository,
    tip: DailyTipRepository,
}

impl PersistClient {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            notes: NoteRepository::new(store.clone()),
            sessions: SessionLogRepository::new(store.clone()),
            chat: ChatHistoryRepository::new(store.clone()),
            plan: StudyPlanRepository::new(store.clone()),
            settings: SettingsRepository::new(store.clone()),
            tip: DailyTipRepository::new(store.clone()),
            store,
        }
    }

    pub fn builder() -> crate::builder::PersistClientBuilder {
        crate::builder::PersistClientBuilder::new()
    }

    pub fn notes(&self) -> &NoteRepository {
        &self.notes
    }

    pub fn sessions(&self) -> &SessionLogRepository {
        &self.sessions
    }

    pub fn chat(&self) -> &ChatHistoryRepository {
        &self.chat
    }

    pub fn plan(&self) -> &StudyPlanRepository {
        &self.plan
    }

    pub fn settings(&self) -> &SettingsRepository {
        &self.settings
    }

    pub fn tip(&self) -> &DailyTipRepository {
        &self.tip
    }

    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Wipes user data. The credential, tip cache and music preference stay.
    pub fn reset_data(&self) -> Result<()> {
        for key in keys::USER_DATA {
            self.store.remove(key)?;
        }
        tracing::info!("User data reset");
        Ok(())
    }

    pub fn clear_credential(&self) -> Result<()> {
        self.settings.clear_credential()?;
        tracing::info!("Credential cleared");
        Ok(())
    }
}
