pub mod store;
pub mod dbs;
pub mod keys;
pub mod models;
pub mod repositories;
pub mod client;
pub mod error;
pub mod builder;

pub use store::{KeyValueStore, KeyValueStoreExt};
pub use dbs::{FileStore, MemoryStore};
pub use models::DailyTip;
pub use repositories::{
    ChatHistoryRepository, DailyTipRepository, NoteRepository, SessionLogRepository,
    SettingsRepository, StudyPlanRepository,
};
pub use client::PersistClient;
pub use error::PersistError;
pub use builder::{PersistClientBuilder, StorageBackend};
