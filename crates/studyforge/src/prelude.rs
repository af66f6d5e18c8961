//! Prelude module for convenient imports
//!
//! ```rust
//! use studyforge::prelude::*;
//! ```

pub use crate::{
    AmbientSound, AppController, AppError, AssistantConfig, AssistantService, ChatMessage,
    Difficulty, FileCapture, FocusTimer, GenerativeClient, Note, PersistClient, QuickAction,
    Screen, StorageBackend, StudyPlan, SystemClock, View,
};
