//! # StudyForge
//!
//! AI study assistant built around a Gemini generative model.
//!
//! ## Overview
//!
//! StudyForge keeps a student's notes and study history in a local store and
//! uses the model to:
//!
//! - **Summarize** notes, read handwriting from photos and transcribe voice memos
//! - **Generate** flashcards, multiple-choice quizzes and study plans
//! - **Chat** with a study assistant, optionally grounded in web search
//! - **Suggest** a daily study tip
//!
//! A focus timer, music embeds and ambient sounds round out the study session.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use studyforge::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let persist = PersistClient::builder()
//!         .backend(StorageBackend::Memory)
//!         .build()?;
//!     let assistant = AssistantService::new(AssistantConfig::default());
//!     let mut app = AppController::new(persist, assistant, Arc::new(SystemClock));
//!
//!     app.submit_credential(&std::env::var("GEMINI_API_KEY")?)?;
//!     app.new_note()?;
//!     app.edit_note("The mitochondria is the powerhouse of the cell.")?;
//!     if let Some(note) = app.summarize_active().await? {
//!         println!("{}", note.summary);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`studyforge-llm`**: generative client traits and the Gemini REST client
//! - **`studyforge-types`**: domain records shared by every crate
//! - **`studyforge-persist`**: key-value store and per-collection repositories
//! - **`studyforge-assistant`**: task facade over the model, chat sessions, tip cache
//! - **`studyforge-app`**: application controller and view state

pub mod prelude;

pub use studyforge_llm::{
    ClientFactory, Content, ContentPart, GeminiClient, GenerateOptions, GenerateRequest,
    GenerateResponse, GenerativeClient, Message, ProviderConfig, StreamEvent, WebSource,
};

pub use studyforge_types::{
    ChatMessage, Clock, Difficulty, Flashcard, GenerationOptions, GroundingSource, Note,
    QuizQuestion, Sender, SessionLog, StudyDay, StudyPlan, StudyTask, SystemClock, TaskType, View,
};

pub use studyforge_persist::{
    FileStore, KeyValueStore, MemoryStore, PersistClient, PersistError, StorageBackend,
};

pub use studyforge_assistant::{
    AssistantConfig, AssistantError, AssistantService, ChatEvent, ChatSession, DailyTipCache,
    Lifecycle,
};

pub use studyforge_app::{
    AmbientSound, AppController, AppError, CaptureDevice, Confirm, DashboardStats, DeckMode,
    DeckStep, Embed, FileCapture, FocusTimer, Phase, QuickAction, Screen, StudyDeck, TimerEvent,
};
