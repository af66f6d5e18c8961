//! Storage key namespace. Every key carries the application prefix.

pub const PREFIX: &str = "studyforge_";

pub const API_KEY: &str = "studyforge_api_key";
pub const NOTES: &str = "studyforge_notes";
pub const SESSION_LOGS: &str = "studyforge_session_logs";
pub const CHAT_HISTORY: &str = "studyforge_chat_history";
pub const STUDY_PLAN: &str = "studyforge_study_plan";
pub const CHECKED_TASKS: &str = "studyforge_checked_tasks";
pub const DAILY_TIP: &str = "studyforge_daily_tip";
pub const MUSIC_EMBED_URL: &str = "studyforge_music_embed_url";

/// Keys wiped by a full data reset. Credential, tip cache and music
/// preference are not user data and survive.
pub const USER_DATA: [&str; 5] = [NOTES, SESSION_LOGS, CHAT_HISTORY, STUDY_PLAN, CHECKED_TASKS];
