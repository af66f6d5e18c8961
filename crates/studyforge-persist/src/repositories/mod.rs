mod chat;
mod notes;
mod plan;
mod sessions;
mod settings;
mod tip;

pub use chat::ChatHistoryRepository;
pub use notes::NoteRepository;
pub use plan::StudyPlanRepository;
pub use sessions::SessionLogRepository;
pub use settings::SettingsRepository;
pub use tip::DailyTipRepository;
