use std::collections::HashSet;

use rand::seq::SliceRandom;
use studyforge_types::{Difficulty, Flashcard, GenerationOptions, Note, QuizQuestion};

pub const MAX_ITEMS: usize = 20;
pub const MAX_QUIZ_ITEMS: usize = 10;
const NOTE_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckStep {
    Select,
    Settings,
    Study,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeckMode {
    #[default]
    Flashcards,
    Quiz,
}

/// Flashcard and quiz runner: pick notes, choose settings, then study
#[derive(Debug, Clone)]
pub struct StudyDeck {
    step: DeckStep,
    mode: DeckMode,
    selected: HashSet<String>,
    options: GenerationOptions,
    flashcards: Vec<Flashcard>,
    quiz: Vec<QuizQuestion>,
    card_index: usize,
    flipped: bool,
    question_index: usize,
    answers: Vec<String>,
}

impl Default for StudyDeck {
    fn default() -> Self {
        Self {
            step: DeckStep::Select,
            mode: DeckMode::Flashcards,
            selected: HashSet::new(),
            options: GenerationOptions::default(),
            flashcards: Vec::new(),
            quiz: Vec::new(),
            card_index: 0,
            flipped: false,
            question_index: 0,
            answers: Vec::new(),
        }
    }
}

impl StudyDeck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> DeckStep {
        self.step
    }

    pub fn mode(&self) -> DeckMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: DeckMode) {
        self.mode = mode;
    }

    pub fn options(&self) -> GenerationOptions {
        self.options
    }

    /// Back to an empty selection with nothing generated
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    // Selection

    /// Returns whether the note is now selected
    pub fn toggle_note(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Moves to settings; needs at least one selected note
    pub fn to_settings(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.step = DeckStep::Settings;
        true
    }

    pub fn back_to_select(&mut self) {
        self.step = DeckStep::Select;
    }

    // Settings

    pub fn set_count(&mut self, count: usize) {
        self.options.count = count.clamp(1, MAX_ITEMS);
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.options.difficulty = difficulty;
    }

    pub fn quiz_options(&self) -> GenerationOptions {
        self.options.with_count(self.options.count.min(MAX_QUIZ_ITEMS))
    }

    /// Study text of the selected notes in collection order, blanks dropped
    pub fn combined_content(&self, notes: &[Note]) -> String {
        notes
            .iter()
            .filter(|n| self.selected.contains(&n.id))
            .map(Note::study_text)
            .filter(|text| !text.trim().is_empty())
            .collect::<Vec<_>>()
            .join(NOTE_SEPARATOR)
    }

    /// Installs freshly generated material and opens the study step
    pub fn load(&mut self, flashcards: Vec<Flashcard>, quiz: Vec<QuizQuestion>) {
        self.flashcards = flashcards;
        self.quiz = quiz;
        self.reset_cards();
        self.restart_quiz();
        self.step = DeckStep::Study;
    }

    /// Back to settings to generate again from the same notes
    pub fn regenerate(&mut self) {
        self.step = DeckStep::Settings;
    }

    // Flashcards

    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    fn reset_cards(&mut self) {
        self.card_index = 0;
        self.flipped = false;
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        self.flashcards.get(self.card_index)
    }

    /// One-based position and total, `(0, 0)` for an empty deck
    pub fn card_position(&self) -> (usize, usize) {
        if self.flashcards.is_empty() {
            return (0, 0);
        }
        (self.card_index + 1, self.flashcards.len())
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn next_card(&mut self) {
        if self.card_index + 1 < self.flashcards.len() {
            self.card_index += 1;
        }
        self.flipped = false;
    }

    pub fn prev_card(&mut self) {
        self.card_index = self.card_index.saturating_sub(1);
        self.flipped = false;
    }

    pub fn shuffle(&mut self) {
        self.flashcards.shuffle(&mut rand::thread_rng());
        self.reset_cards();
    }

    // Quiz

    pub fn quiz(&self) -> &[QuizQuestion] {
        &self.quiz
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.is_quiz_complete() {
            return None;
        }
        self.quiz.get(self.question_index)
    }

    pub fn question_position(&self) -> (usize, usize) {
        if self.quiz.is_empty() {
            return (0, 0);
        }
        (self.question_index + 1, self.quiz.len())
    }

    pub fn is_quiz_complete(&self) -> bool {
        !self.quiz.is_empty() && self.answers.len() == self.quiz.len()
    }

    /// Records an answer for the current question and advances. Returns
    /// whether it was correct, or `None` when there is nothing to answer.
    pub fn answer(&mut self, choice: &str) -> Option<bool> {
        let correct = self.current_question()?.correct_answer == choice;
        self.answers.push(choice.to_string());
        if self.question_index + 1 < self.quiz.len() {
            self.question_index += 1;
        }
        Some(correct)
    }

    /// Answers with the option at zero-based `index`
    pub fn answer_option(&mut self, index: usize) -> Option<bool> {
        let choice = self.current_question()?.options.get(index)?.clone();
        self.answer(&choice)
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn score(&self) -> usize {
        self.quiz
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| &q.correct_answer == *a)
            .count()
    }

    /// Rounded percentage of correct answers
    pub fn score_percent(&self) -> u32 {
        if self.quiz.is_empty() {
            return 0;
        }
        ((self.score() as f64 / self.quiz.len() as f64) * 100.0).round() as u32
    }

    pub fn restart_quiz(&mut self) {
        self.question_index = 0;
        self.answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(q: &str, correct: &str) -> QuizQuestion {
        QuizQuestion {
            question: q.into(),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct_answer: correct.into(),
        }
    }

    #[test]
    fn test_combined_content_prefers_summary_and_skips_blanks() {
        let mut deck = StudyDeck::new();
        let mut a = Note::new("1");
        a.content = "raw".into();
        a.summary = "summary".into();
        let b = Note::new("2");
        let mut c = Note::new("3");
        c.content = "plain".into();
        for id in ["1", "2", "3"] {
            deck.toggle_note(id);
        }
        assert_eq!(
            deck.combined_content(&[a, b, c]),
            "summary\n\n---\n\nplain"
        );
    }

    #[test]
    fn test_quiz_scoring() {
        let mut deck = StudyDeck::new();
        deck.load(Vec::new(), vec![question("q1", "a"), question("q2", "c")]);
        assert_eq!(deck.answer("a"), Some(true));
        assert_eq!(deck.answer_option(1), Some(false));
        assert!(deck.is_quiz_complete());
        assert_eq!(deck.answer("a"), None);
        assert_eq!(deck.score(), 1);
        assert_eq!(deck.score_percent(), 50);
    }

    #[test]
    fn test_empty_deck_has_no_position() {
        let mut deck = StudyDeck::new();
        deck.load(Vec::new(), Vec::new());
        deck.next_card();
        assert_eq!(deck.card_position(), (0, 0));
        assert_eq!(deck.question_position(), (0, 0));
        assert!(deck.current_card().is_none());
    }

    #[test]
    fn test_card_navigation_stays_in_bounds() {
        let mut deck = StudyDeck::new();
        let cards = vec![
            Flashcard { question: "1".into(), answer: "one".into() },
            Flashcard { question: "2".into(), answer: "two".into() },
        ];
        deck.load(cards, Vec::new());
        deck.prev_card();
        assert_eq!(deck.card_position(), (1, 2));
        deck.flip();
        deck.next_card();
        deck.next_card();
        assert_eq!(deck.card_position(), (2, 2));
        assert!(!deck.is_flipped());
        deck.shuffle();
        assert_eq!(deck.card_position(), (1, 2));
        assert_eq!(deck.flashcards().len(), 2);
    }

    #[test]
    fn test_settings_need_a_selection_and_clamp_count() {
        let mut deck = StudyDeck::new();
        assert!(!deck.to_settings());
        deck.toggle_note("1");
        assert!(deck.to_settings());
        deck.set_count(50);
        assert_eq!(deck.options().count, MAX_ITEMS);
        assert_eq!(deck.quiz_options().count, MAX_QUIZ_ITEMS);
        deck.set_count(0);
        assert_eq!(deck.options().count, 1);
    }
}
