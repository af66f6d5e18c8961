use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Top-level screens; exactly one is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    #[default]
    Dashboard,
    Notes,
    Flashcards,
    Planner,
    Study,
    Ask,
}

impl View {
    pub const ALL: [View; 6] = [
        View::Dashboard,
        View::Notes,
        View::Flashcards,
        View::Planner,
        View::Study,
        View::Ask,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Notes => "My Notes",
            Self::Flashcards => "Flashcards & Quiz",
            Self::Planner => "Study Planner",
            Self::Study => "Study Session",
            Self::Ask => "Ask AI",
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashboard" | "home" => Ok(Self::Dashboard),
            "notes" => Ok(Self::Notes),
            "flashcards" | "quiz" => Ok(Self::Flashcards),
            "planner" | "plan" => Ok(Self::Planner),
            "study" | "session" | "timer" => Ok(Self::Study),
            "ask" | "chat" => Ok(Self::Ask),
            other => Err(format!("unknown view: {}", other)),
        }
    }
}
