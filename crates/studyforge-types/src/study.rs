use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuizQuestion {
    pub const OPTION_COUNT: usize = 4;

    /// Exactly four options, one of which is the correct answer
    pub fn is_well_formed(&self) -> bool {
        !self.question.trim().is_empty()
            && self.options.len() == Self::OPTION_COUNT
            && self.options.iter().any(|o| o == &self.correct_answer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {}", other)),
        }
    }
}

/// Item count and difficulty for flashcard/quiz generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub count: usize,
    pub difficulty: Difficulty,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            count: 5,
            difficulty: Difficulty::Medium,
        }
    }
}

impl GenerationOptions {
    pub fn new(count: usize, difficulty: Difficulty) -> Self {
        Self { count, difficulty }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_well_formed() {
        let mut q = QuizQuestion {
            question: "2+2?".into(),
            options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            correct_answer: "4".into(),
        };
        assert!(q.is_well_formed());
        q.correct_answer = "5".into();
        assert!(!q.is_well_formed());
        q.correct_answer = "4".into();
        q.options.pop();
        assert!(!q.is_well_formed());
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default().to_string(), "Medium");
    }
}
