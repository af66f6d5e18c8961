//! Prompt text and user-facing fallbacks.

use studyforge_types::GenerationOptions;

pub const SUMMARY_FALLBACK: &str = "Sorry, I couldn't summarize the notes. Please try again.";
pub const IMAGE_FALLBACK: &str =
    "Sorry, I couldn't read the text from the image. Please try a clearer picture.";
pub const AUDIO_FALLBACK: &str = "Sorry, I couldn't process the audio. Please try again.";
pub const TIP_FALLBACK: &str =
    "Could not fetch a study tip right now. Try to stay organized and take regular breaks!";

pub const IMAGE_MIME_TYPE: &str = "image/jpeg";

pub const EXTRACT_TEXT: &str =
    "Extract the handwritten text from this image. If the image is unclear, state that.";
pub const TRANSCRIBE: &str = "Transcribe the following audio recording of a student's notes accurately. If parts are unclear, indicate that.";
pub const STUDY_TIP: &str = "Provide a concise, insightful, and actionable study tip for a university student. The tip should be a single paragraph.";

pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are a helpful and friendly AI study assistant for students. Answer questions clearly and concisely. If a question is outside academic topics, politely decline to answer. Use markdown for formatting when it improves clarity.";

pub const CHAT_GREETING: &str =
    "Hello! I'm your AI study assistant. Ask me anything about your subjects.";
pub const CHAT_INIT_ERROR: &str = "There was an error initializing the chat. The AI service may be unavailable. Please try again later.";
pub const CHAT_REPLY_ERROR: &str = "Sorry, I encountered an error. Please try again.";

pub const PROMPT_STARTERS: [&str; 3] = [
    "Explain quantum computing simply",
    "Summarize the plot of 'Hamlet'",
    "Create a 3-step study plan for a history test",
];

pub fn summarize(text: &str) -> String {
    format!(
        "Summarize the following notes concisely for a student. Focus on key concepts, definitions, and important facts. Format the output neatly using markdown:\n\n---\n\n{}",
        text
    )
}

pub fn flashcards(notes: &str, options: &GenerationOptions) -> String {
    format!(
        "Based on these notes, generate {} flashcards. The difficulty should be '{}'. Each flashcard must be a clear question and a concise answer pair. Notes:\n\n{}",
        options.count, options.difficulty, notes
    )
}

pub fn quiz(notes: &str, options: &GenerationOptions) -> String {
    format!(
        "Based on these notes, generate a multiple-choice quiz with {} questions. The difficulty should be '{}'. Each question must have 4 options, and one must be the correct answer. Notes:\n\n{}",
        options.count, options.difficulty, notes
    )
}

pub fn study_plan(topic: &str, duration: &str, goals: &str) -> String {
    format!(
        "Create a detailed study plan for a student.\n\
         - Topic: {}\n\
         - Timeframe: {}\n\
         - Learning Goals: {}\n\n\
         Break down the plan into logical periods (e.g., days or weeks). For each period, list the key topics to cover and suggest a mix of actionable tasks like reading specific chapters, watching videos, doing practice problems, and reviewing concepts.",
        topic, duration, goals
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use studyforge_types::Difficulty;

    #[test]
    fn test_generation_prompts_embed_options() {
        let options = GenerationOptions::new(7, Difficulty::Hard);
        let prompt = flashcards("mitosis", &options);
        assert!(prompt.contains("generate 7 flashcards"));
        assert!(prompt.contains("'Hard'"));
        assert!(prompt.ends_with("Notes:\n\nmitosis"));
    }

    #[test]
    fn test_study_plan_prompt_lists_inputs() {
        let prompt = study_plan("Calculus", "2 weeks", "pass the midterm");
        assert!(prompt.contains("- Topic: Calculus\n"));
        assert!(prompt.contains("- Timeframe: 2 weeks\n"));
        assert!(prompt.contains("- Learning Goals: pass the midterm\n"));
    }
}
