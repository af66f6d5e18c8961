pub mod ambient;
pub mod capture;
pub mod confirm;
pub mod controller;
pub mod dashboard;
pub mod deck;
pub mod embed;
pub mod error;
pub mod music;
pub mod notebook;
pub mod planner;
pub mod timer;

pub use ambient::AmbientSound;
pub use capture::{CaptureDevice, CaptureKind, FileCapture, MediaBlob};
pub use confirm::Confirm;
pub use controller::{AppController, Screen};
pub use dashboard::{DashboardStats, QuickAction};
pub use deck::{DeckMode, DeckStep, StudyDeck};
pub use embed::Embed;
pub use error::AppError;
pub use music::{LocalAudio, MusicPlayer};
pub use notebook::NoteBook;
pub use planner::Planner;
pub use timer::{FocusTimer, Phase, TimerEvent, TimerPreset};
