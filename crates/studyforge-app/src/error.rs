use thiserror::Error;

use studyforge_assistant::AssistantError;
use studyforge_persist::PersistError;

/// Conditions surfaced to the user. Display text is the alert shown.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please set your API key first.")]
    NotInitialized,

    #[error("Invalid API Key. Please enter a valid Google Gemini API key.")]
    InvalidCredential,

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("No note is open.")]
    NoActiveNote,

    #[error("Selected notes have no content to generate from.")]
    NoContent,

    #[error("Invalid or unsupported URL. Please use a valid link from Spotify, YouTube, Apple Music, SoundCloud, Deezer, TIDAL, Napster, Mixcloud, or iHeartRadio (podcasts).")]
    UnsupportedEmbed,

    #[error("{0}")]
    CaptureDenied(String),

    #[error("Could not open audio file: {0}")]
    AudioFile(String),

    #[error("Sorry, I couldn't generate a study plan. Please try refining your topic or try again later.")]
    PlanGeneration,

    #[error("No such task: period {day}, task {task}")]
    TaskNotFound { day: usize, task: usize },

    #[error("Storage error: {0}")]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Assistant(AssistantError),
}

impl From<AssistantError> for AppError {
    fn from(e: AssistantError) -> Self {
        match e {
            AssistantError::Uninitialized => Self::NotInitialized,
            AssistantError::InvalidCredential(_) => Self::InvalidCredential,
            other => Self::Assistant(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
