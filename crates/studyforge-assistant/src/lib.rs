pub mod chat;
pub mod config;
pub mod error;
pub mod history;
pub mod prompts;
pub mod schemas;
pub mod service;
pub mod testing;
pub mod tip;

pub use chat::{ChatEvent, ChatSession, ChatStream};
pub use config::AssistantConfig;
pub use error::AssistantError;
pub use history::{HistoryAction, ReplyAccumulator};
pub use service::{AssistantService, Lifecycle};
pub use tip::DailyTipCache;
