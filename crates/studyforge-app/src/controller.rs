use std::path::Path;
use std::sync::Arc;

use futures::StreamExt;
use studyforge_assistant::history::{self, HistoryAction};
use studyforge_assistant::{AssistantService, ChatSession, DailyTipCache, ReplyAccumulator};
use studyforge_persist::PersistClient;
use studyforge_types::{ChatMessage, Clock, Note, SessionLog, View};

use crate::ambient::AmbientSound;
use crate::capture::{capture_once, CaptureDevice};
use crate::confirm::{self, Confirm};
use crate::dashboard::{DashboardStats, QuickAction};
use crate::deck::StudyDeck;
use crate::embed::Embed;
use crate::error::{AppError, Result};
use crate::music::{LocalAudio, MusicPlayer};
use crate::notebook::NoteBook;
use crate::planner::{Planner, DEFAULT_DURATION};
use crate::timer::{FocusTimer, TimerEvent};

/// What the front end should render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// No working credential yet
    Landing,
    Main(View),
}

/// Top-level application state.
///
/// Holds the active view, the assistant and every persisted collection, and
/// routes user actions to them. Each mutation is written through to the
/// store before the call returns. Operations that await the model take
/// `&mut self`, so at most one of them is in flight.
pub struct AppController {
    persist: PersistClient,
    assistant: AssistantService,
    clock: Arc<dyn Clock>,
    tip_cache: DailyTipCache,
    view: View,
    notebook: NoteBook,
    session_logs: Vec<SessionLog>,
    chat_history: Vec<ChatMessage>,
    chat: Option<ChatSession>,
    deck: StudyDeck,
    planner: Planner,
    timer: FocusTimer,
    music: MusicPlayer,
}

impl AppController {
    pub fn new(persist: PersistClient, assistant: AssistantService, clock: Arc<dyn Clock>) -> Self {
        Self {
            tip_cache: DailyTipCache::new(persist.tip().clone(), clock.clone()),
            notebook: NoteBook::new(persist.notes().clone(), clock.clone()),
            session_logs: persist.sessions().load(),
            chat_history: persist.chat().load(),
            planner: Planner::new(persist.plan().clone()),
            music: MusicPlayer::new(persist.settings().clone()),
            view: View::Dashboard,
            chat: None,
            deck: StudyDeck::new(),
            timer: FocusTimer::default(),
            persist,
            assistant,
            clock,
        }
    }

    /// Replaces the focus timer, typically with configured durations
    pub fn with_timer(mut self, timer: FocusTimer) -> Self {
        self.timer = timer;
        self
    }

    // Lifecycle

    /// Initializes the assistant from the stored credential, if any. A stored
    /// credential that fails to initialize is removed.
    pub fn start(&mut self) -> Result<Screen> {
        if self.assistant.is_ready() {
            return Ok(self.screen());
        }
        let Some(credential) = self.persist.settings().credential() else {
            return Ok(Screen::Landing);
        };
        if let Err(e) = self.assistant.try_initialize(&credential) {
            tracing::warn!(error = %e, "Stored credential rejected");
            self.persist.clear_credential()?;
            return Err(e.into());
        }
        Ok(self.screen())
    }

    /// Validates and stores a credential. While a working client exists it
    /// is only replaced once the new credential initializes.
    pub fn submit_credential(&mut self, credential: &str) -> Result<()> {
        if self.assistant.is_ready() {
            let mut candidate = AssistantService::new(self.assistant.config().clone());
            if let Err(e) = candidate.try_initialize(credential) {
                tracing::warn!(error = %e, "New credential rejected, keeping current client");
                return Err(e.into());
            }
            self.assistant = candidate;
        } else if let Err(e) = self.assistant.try_initialize(credential) {
            self.persist.clear_credential()?;
            return Err(e.into());
        }
        self.persist.settings().set_credential(credential.trim())?;
        self.chat = None;
        Ok(())
    }

    pub fn screen(&self) -> Screen {
        if self.assistant.is_ready() {
            Screen::Main(self.view)
        } else {
            Screen::Landing
        }
    }

    pub fn is_ready(&self) -> bool {
        self.assistant.is_ready()
    }

    /// Forgets the credential and returns to the landing screen. Returns
    /// false when the user declines.
    pub fn clear_credential(&mut self, confirm: &mut dyn Confirm) -> Result<bool> {
        if !confirm.confirm(confirm::CLEAR_CREDENTIAL) {
            return Ok(false);
        }
        self.persist.clear_credential()?;
        self.reload();
        Ok(true)
    }

    /// Wipes notes, sessions, chat and plan. Returns false when the user
    /// declines.
    pub fn reset_data(&mut self, confirm: &mut dyn Confirm) -> Result<bool> {
        if !confirm.confirm(confirm::RESET_DATA) {
            return Ok(false);
        }
        self.persist.reset_data()?;
        self.reload();
        Ok(true)
    }

    /// Rebuilds all in-memory state from the store
    pub fn reload(&mut self) {
        if self.persist.settings().credential().is_none() {
            self.assistant.clear();
        }
        self.view = View::Dashboard;
        self.notebook.reload();
        self.session_logs = self.persist.sessions().load();
        self.chat_history = self.persist.chat().load();
        self.chat = None;
        self.deck.reset_all();
        self.planner.reload();
        self.timer = FocusTimer::new(self.timer.work_minutes(), self.timer.break_minutes());
        self.music.reload();
        tracing::debug!("State reloaded from store");
    }

    // Navigation

    pub fn view(&self) -> View {
        self.view
    }

    pub fn navigate(&mut self, view: View) -> Result<()> {
        self.view = view;
        if view == View::Ask {
            self.open_chat()?;
        }
        Ok(())
    }

    pub fn quick_action(&mut self, action: QuickAction) -> Result<()> {
        match action {
            QuickAction::NewNote => {
                self.navigate(View::Notes)?;
                self.new_note()?;
            }
            QuickAction::NewSession => self.navigate(View::Study)?,
        }
        Ok(())
    }

    // Dashboard

    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::collect(self.notebook.notes(), &self.session_logs)
    }

    pub async fn daily_tip(&self) -> Result<String> {
        Ok(self.tip_cache.get(&self.assistant).await?)
    }

    // Notes

    pub fn notebook(&self) -> &NoteBook {
        &self.notebook
    }

    pub fn notes(&self) -> &[Note] {
        self.notebook.notes()
    }

    pub fn search_notes(&self, query: &str, tag: Option<&str>) -> Vec<&Note> {
        self.notebook.filtered(query, tag)
    }

    pub fn new_note(&mut self) -> Result<Note> {
        self.notebook.create()
    }

    pub fn open_note(&mut self, id: &str) -> Result<Note> {
        self.notebook.open(id).cloned()
    }

    pub fn close_note(&mut self) {
        self.notebook.close();
    }

    pub fn edit_note(&mut self, content: &str) -> Result<Note> {
        self.notebook.set_content(content)
    }

    pub fn add_tag(&mut self, tag: &str) -> Result<bool> {
        self.notebook.add_tag(tag)
    }

    pub fn remove_tag(&mut self, tag: &str) -> Result<bool> {
        self.notebook.remove_tag(tag)
    }

    pub fn delete_note(&mut self, id: &str) -> Result<()> {
        self.notebook.delete(id)
    }

    /// Summarizes the open note. `None` when it has no content.
    pub async fn summarize_active(&mut self) -> Result<Option<Note>> {
        let content = self
            .notebook
            .active()
            .map(|n| n.content.clone())
            .ok_or(AppError::NoActiveNote)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let summary = self.assistant.summarize(&content).await?;
        Ok(Some(self.notebook.set_summary(summary)?))
    }

    /// Photographs a page and appends the recognized text to the open note
    pub async fn capture_image(&mut self, device: &mut dyn CaptureDevice) -> Result<Note> {
        self.notebook.active().ok_or(AppError::NoActiveNote)?;
        let blob = capture_once(device).await?;
        let text = self.assistant.extract_text(&blob.bytes).await?;
        self.notebook.append_scanned(&text)
    }

    /// Records audio and appends the transcript to the open note
    pub async fn capture_voice(&mut self, device: &mut dyn CaptureDevice) -> Result<Note> {
        self.notebook.active().ok_or(AppError::NoActiveNote)?;
        let blob = capture_once(device).await?;
        let transcript = self
            .assistant
            .transcribe(&blob.bytes, &blob.mime_type)
            .await?;
        self.notebook.append_voice(&transcript)
    }

    // Study session

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut FocusTimer {
        &mut self.timer
    }

    pub fn session_logs(&self) -> &[SessionLog] {
        &self.session_logs
    }

    /// Advances the timer one second, logging a session when a work phase
    /// completes
    pub fn tick_timer(&mut self) -> Result<Option<TimerEvent>> {
        let event = self.timer.tick();
        if let Some(TimerEvent::WorkCompleted { minutes }) = event {
            let log = SessionLog::completed_at(self.clock.now(), minutes);
            self.session_logs = self.persist.sessions().record(log)?;
            tracing::info!(minutes, "Study session completed");
        }
        Ok(event)
    }

    // Ask AI

    pub fn chat_history(&self) -> &[ChatMessage] {
        &self.chat_history
    }

    /// Opens the chat, creating the session on first use, and returns the
    /// history to display
    pub fn open_chat(&mut self) -> Result<&[ChatMessage]> {
        if self.chat.is_none() {
            self.chat = match self.assistant.create_chat_session() {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create chat session");
                    None
                }
            };
        }

        let available = self.chat.is_some();
        self.chat_history = history::seed(std::mem::take(&mut self.chat_history), available);
        if available {
            self.persist.chat().save(&self.chat_history)?;
        }
        Ok(&self.chat_history)
    }

    /// Sends a chat message and streams the reply into the history.
    ///
    /// `on_update` sees the history after every visible change. Blank input
    /// is ignored and returns false. A failed exchange still ends with one
    /// reply entry carrying the error text.
    pub async fn send_chat<F>(&mut self, text: &str, web_search: bool, mut on_update: F) -> Result<bool>
    where
        F: FnMut(&[ChatMessage]),
    {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }
        if self.chat.is_none() {
            self.open_chat()?;
        }
        let Some(session) = self.chat.clone() else {
            return Err(AppError::NotInitialized);
        };

        self.apply_chat(HistoryAction::UserSent(text.to_string()), &mut on_update);
        self.persist.chat().save(&self.chat_history)?;

        let mut reply = ReplyAccumulator::new();
        let mut failed = false;
        match session.send_message_stream(text, web_search).await {
            Ok(mut stream) => {
                while let Some(item) = stream.next().await {
                    match item {
                        Ok(event) => {
                            if let Some(action) = reply.on_event(event) {
                                self.apply_chat(action, &mut on_update);
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Chat reply failed");
                            failed = true;
                            break;
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to send chat message");
                failed = true;
            }
        }

        if failed || reply.text().is_empty() {
            self.apply_chat(HistoryAction::Failed, &mut on_update);
        }
        self.persist.chat().save(&self.chat_history)?;
        Ok(true)
    }

    fn apply_chat(&mut self, action: HistoryAction, on_update: &mut impl FnMut(&[ChatMessage])) {
        self.chat_history = history::reduce(std::mem::take(&mut self.chat_history), action);
        on_update(&self.chat_history);
    }

    // Flashcards & quiz

    pub fn deck(&self) -> &StudyDeck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut StudyDeck {
        &mut self.deck
    }

    /// Generates flashcards and a quiz from the selected notes.
    ///
    /// Both requests run concurrently. When the selection has no text the
    /// model is never called and the current deck is kept.
    pub async fn generate_deck(&mut self) -> Result<()> {
        let content = self.deck.combined_content(self.notebook.notes());
        if content.trim().is_empty() {
            return Err(AppError::NoContent);
        }

        let (flashcards, quiz) = tokio::join!(
            self.assistant
                .generate_flashcards(&content, self.deck.options()),
            self.assistant
                .generate_quiz(&content, self.deck.quiz_options()),
        );
        let (flashcards, quiz) = (flashcards?, quiz?);
        tracing::info!(
            flashcards = flashcards.len(),
            questions = quiz.len(),
            "Generated study deck"
        );
        self.deck.load(flashcards, quiz);
        Ok(())
    }

    // Planner

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// Asks the model for a plan. Replacing an existing plan needs
    /// confirmation; returns false when declined or the topic is blank. On
    /// failure the current plan is kept.
    pub async fn generate_plan(
        &mut self,
        topic: &str,
        duration: &str,
        goals: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<bool> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Ok(false);
        }
        if self.planner.has_plan() && !confirm.confirm(confirm::REPLACE_PLAN) {
            return Ok(false);
        }
        let duration = match duration.trim() {
            "" => DEFAULT_DURATION,
            d => d,
        };

        let plan = self
            .assistant
            .generate_study_plan(topic, duration, goals.trim())
            .await?
            .ok_or(AppError::PlanGeneration)?;
        self.planner.replace(plan)?;
        Ok(true)
    }

    /// Toggles a task by one-based day and task numbers
    pub fn toggle_task(&mut self, day: usize, task: usize) -> Result<bool> {
        if day == 0 || task == 0 {
            return Err(AppError::TaskNotFound { day, task });
        }
        self.planner.toggle(day - 1, task - 1)
    }

    pub fn reset_plan_progress(&mut self, confirm: &mut dyn Confirm) -> Result<bool> {
        if !confirm.confirm(confirm::RESET_PROGRESS) {
            return Ok(false);
        }
        self.planner.clear_progress()?;
        Ok(true)
    }

    // Music

    pub fn music(&self) -> &MusicPlayer {
        &self.music
    }

    pub fn load_music(&mut self, url: &str) -> Result<Embed> {
        self.music.load_url(url)
    }

    pub fn load_music_file(&mut self, path: &Path) -> Result<LocalAudio> {
        self.music.load_file(path).cloned()
    }

    pub fn select_ambient(&mut self, sound: AmbientSound) -> Result<()> {
        self.music.select_ambient(sound)
    }
}
