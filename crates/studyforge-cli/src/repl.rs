use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use studyforge_app::confirm;
use studyforge_app::deck::DeckStep;
use studyforge_app::timer::{preset, Phase, PRESETS};
use studyforge_app::{AppController, FileCapture, Screen, TimerEvent};
use studyforge_assistant::prompts;
use studyforge_types::{ChatMessage, View};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::commands::{self, CardAction, Command, TimerAction};
use crate::ticker::Ticker;

/// Line-oriented front end over the controller
pub struct Repl {
    app: AppController,
    lines: Lines<BufReader<Stdin>>,
}

impl Repl {
    pub fn new(app: AppController) -> Self {
        Self {
            app,
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        self.render_screen();
        let mut ticker = Ticker::new(Duration::from_secs(1));
        let mut show_prompt = true;

        loop {
            let ticking = ticker.sync(self.app.timer().is_running());
            if show_prompt {
                prompt(&self.app);
            }
            show_prompt = true;
            let line = tokio::select! {
                line = self.lines.next_line() => line?,
                _ = ticker.tick(), if ticking => {
                    show_prompt = self.on_tick()?;
                    continue;
                }
            };
            let Some(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match commands::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }
            if !self.app.is_ready() && !command.allowed_on_landing() {
                println!("Please set your API key first: key <credential>");
                continue;
            }
            if let Err(e) = self.dispatch(command).await {
                tracing::debug!(error = ?e, "Command failed");
                println!("{}", e);
            }
        }
        Ok(())
    }

    async fn ask(&mut self, message: &str) -> Result<bool> {
        println!("{}", message);
        print!("[y/N] ");
        std::io::stdout().flush()?;
        let answer = self.lines.next_line().await?.unwrap_or_default();
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    /// Returns whether anything was printed
    fn on_tick(&mut self) -> Result<bool> {
        let event = self.app.tick_timer()?;
        match event {
            Some(TimerEvent::WorkCompleted { minutes }) => {
                println!("\n{} ({} min logged)", self.app.timer().message(), minutes);
                println!("Break ready: {}. Type 'timer start'.", self.app.timer().display());
            }
            Some(TimerEvent::BreakCompleted) => {
                println!("\nBreak over. {}", self.app.timer().message());
            }
            None => {}
        }
        Ok(event.is_some())
    }

    async fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Key(credential) => {
                self.app.submit_credential(&credential)?;
                println!("API key accepted.");
                self.render_screen();
            }
            Command::KeyClear => {
                let answer = self.ask(confirm::CLEAR_CREDENTIAL).await?;
                if self.app.clear_credential(&mut |_: &str| answer)? {
                    self.render_screen();
                }
            }
            Command::Reset => {
                let answer = self.ask(confirm::RESET_DATA).await?;
                if self.app.reset_data(&mut |_: &str| answer)? {
                    println!("All app data has been reset.");
                    self.render_screen();
                }
            }
            Command::View(view) => {
                self.app.navigate(view)?;
                self.render_screen();
            }
            Command::Dashboard => {
                self.app.navigate(View::Dashboard)?;
                self.render_screen();
            }
            Command::NewNote => {
                self.app.navigate(View::Notes)?;
                let note = self.app.new_note()?;
                println!("Created note {}", note.id);
            }
            Command::Notes { query, tag } => self.list_notes(&query, tag.as_deref()),
            Command::Open(id) => {
                let note = self.app.open_note(&id)?;
                print_note(&note);
            }
            Command::Close => self.app.close_note(),
            Command::Edit(text) => {
                let note = self.app.edit_note(&text)?;
                println!("Saved \"{}\"", note.title());
            }
            Command::Tag(tag) => {
                if !self.app.add_tag(&tag)? {
                    println!("Tag already present.");
                }
            }
            Command::Untag(tag) => {
                self.app.remove_tag(&tag)?;
            }
            Command::Summarize => match self.app.summarize_active().await? {
                Some(note) => println!("{}", note.summary),
                None => println!("Nothing to summarize yet."),
            },
            Command::Delete(id) => {
                self.app.delete_note(&id)?;
                println!("Deleted {}", id);
            }
            Command::Scan(path) => {
                let note = self.app.capture_image(&mut FileCapture::camera(path)).await?;
                print_note(&note);
            }
            Command::Voice(path) => {
                let note = self
                    .app
                    .capture_voice(&mut FileCapture::microphone(path))
                    .await?;
                print_note(&note);
            }
            Command::Select(ids) => {
                for id in ids {
                    let selected = self.app.deck_mut().toggle_note(&id);
                    println!("{} {}", if selected { "+" } else { "-" }, id);
                }
            }
            Command::Generate { count, difficulty } => self.generate(count, difficulty).await?,
            Command::Card(action) => {
                let deck = self.app.deck_mut();
                match action {
                    CardAction::Next => deck.next_card(),
                    CardAction::Prev => deck.prev_card(),
                    CardAction::Flip => deck.flip(),
                    CardAction::Shuffle => deck.shuffle(),
                }
                self.show_card();
            }
            Command::Answer(n) => {
                let Some(correct) = n
                    .checked_sub(1)
                    .and_then(|i| self.app.deck_mut().answer_option(i))
                else {
                    println!("No such option.");
                    return Ok(());
                };
                println!("{}", if correct { "Correct!" } else { "Incorrect." });
                self.show_question();
            }
            Command::QuizRestart => {
                self.app.deck_mut().restart_quiz();
                self.show_question();
            }
            Command::Plan {
                topic,
                duration,
                goals,
            } => {
                let answer = if self.app.planner().has_plan() {
                    self.ask(confirm::REPLACE_PLAN).await?
                } else {
                    true
                };
                println!("Generating plan...");
                if self
                    .app
                    .generate_plan(&topic, &duration, &goals, &mut |_: &str| answer)
                    .await?
                {
                    self.show_plan();
                }
            }
            Command::Check { day, task } => {
                let done = self.app.toggle_task(day, task)?;
                println!("{}", if done { "Done." } else { "Unchecked." });
                println!("Progress: {:.0}%", self.app.planner().progress());
            }
            Command::ProgressReset => {
                let answer = self.ask(confirm::RESET_PROGRESS).await?;
                if self.app.reset_plan_progress(&mut |_: &str| answer)? {
                    self.show_plan();
                }
            }
            Command::Timer(action) => self.timer(action),
            Command::Music(url) => {
                let embed = self.app.load_music(&url)?;
                println!("{} player: {} (height {})", embed.provider, embed.url, embed.height);
            }
            Command::MusicFile(path) => {
                let audio = self.app.load_music_file(&path)?;
                println!("Now playing: {} ({})", audio.name, audio.mime_type);
            }
            Command::Ambient(sound) => {
                self.app.select_ambient(sound)?;
                match self.app.music().background_url() {
                    Some(url) => println!("{} sounds: {}", sound, url),
                    None => println!("Ambient sound off."),
                }
            }
            Command::Ask { text, web_search } => self.chat(&text, web_search).await?,
            Command::Tip => println!("{}", self.app.daily_tip().await?),
            Command::Help => println!("{}", commands::HELP),
            Command::Quit => {}
        }
        Ok(())
    }

    async fn generate(
        &mut self,
        count: Option<usize>,
        difficulty: Option<studyforge_types::Difficulty>,
    ) -> Result<()> {
        let deck = self.app.deck_mut();
        if !deck.to_settings() {
            println!("Select at least one note first: select <ids..>");
            return Ok(());
        }
        if let Some(count) = count {
            deck.set_count(count);
        }
        if let Some(difficulty) = difficulty {
            deck.set_difficulty(difficulty);
        }
        println!("Generating...");
        self.app.generate_deck().await?;

        let deck = self.app.deck();
        if deck.flashcards().is_empty() && deck.quiz().is_empty() {
            println!("Sorry, nothing usable came back. Try again.");
            self.app.deck_mut().regenerate();
            return Ok(());
        }
        println!(
            "{} flashcards, {} quiz questions.",
            deck.flashcards().len(),
            deck.quiz().len()
        );
        self.show_card();
        Ok(())
    }

    async fn chat(&mut self, text: &str, web_search: bool) -> Result<()> {
        if self.app.view() != View::Ask {
            self.app.navigate(View::Ask)?;
        }
        let mut shown = String::new();
        let sent = self
            .app
            .send_chat(text, web_search, |history| {
                let Some(last) = history.last().filter(|m| m.is_ai()) else {
                    return;
                };
                if let Some(rest) = last.text.strip_prefix(shown.as_str()) {
                    print!("{}", rest);
                    std::io::stdout().flush().ok();
                } else {
                    print!("\n{}", last.text);
                }
                shown = last.text.clone();
            })
            .await?;
        if !sent {
            return Ok(());
        }
        println!();
        if let Some(sources) = self.app.chat_history().last().and_then(|m| m.sources.as_ref()) {
            println!("Sources:");
            for source in sources {
                println!("  {} <{}>", source.title, source.uri);
            }
        }
        Ok(())
    }

    fn timer(&mut self, action: TimerAction) {
        let timer = self.app.timer_mut();
        match action {
            TimerAction::Status => {}
            TimerAction::Start => timer.start(),
            TimerAction::Pause => timer.pause(),
            TimerAction::Reset => {
                let phase = timer.phase();
                timer.reset(phase);
            }
            TimerAction::Preset(name) => match preset(&name) {
                Some(p) => timer.apply_preset(p.work_minutes, p.break_minutes),
                None => {
                    let names: Vec<_> = PRESETS.iter().map(|p| p.name).collect();
                    println!("Unknown preset. Try: {}", names.join(", "));
                }
            },
            TimerAction::Work(minutes) => timer.set_work_minutes(minutes),
            TimerAction::Break(minutes) => timer.set_break_minutes(minutes),
        }
        self.show_timer();
    }

    // Rendering

    fn render_screen(&mut self) {
        match self.app.screen() {
            Screen::Landing => {
                println!("Welcome to StudyForge, your AI study assistant.");
                println!("Enter your Google Gemini API key with: key <credential>");
            }
            Screen::Main(view) => {
                println!("== {} ==", view.label());
                match view {
                    View::Dashboard => self.show_dashboard(),
                    View::Notes => self.list_notes("", None),
                    View::Flashcards => self.show_deck(),
                    View::Planner => self.show_plan(),
                    View::Study => self.show_timer(),
                    View::Ask => self.show_chat(),
                }
            }
        }
    }

    fn show_dashboard(&self) {
        let stats = self.app.dashboard();
        println!(
            "Notes: {}   Sessions: {}   Study time: {} min",
            stats.total_notes, stats.sessions, stats.total_minutes
        );
        if !stats.recent_notes.is_empty() {
            println!("Recent notes:");
            for note in &stats.recent_notes {
                println!("  {}  {}", note.id, note.title());
            }
        }
        println!("Quick actions: new-note, view study. Type 'tip' for today's study tip.");
    }

    fn list_notes(&self, query: &str, tag: Option<&str>) {
        let notes = self.app.search_notes(query, tag);
        if notes.is_empty() {
            println!("No notes found.");
        }
        for note in notes {
            let tags = note
                .tags
                .iter()
                .map(|t| format!("#{}", t))
                .collect::<Vec<_>>()
                .join(" ");
            println!("  {}  {}  {}", note.id, note.title(), tags);
        }
        let tags = self.app.notebook().all_tags();
        if !tags.is_empty() {
            println!("Tags: {}", tags.join(", "));
        }
    }

    fn show_deck(&self) {
        let deck = self.app.deck();
        match deck.step() {
            DeckStep::Select | DeckStep::Settings => {
                println!(
                    "{} note(s) selected, {} items, {} difficulty.",
                    deck.selected_count(),
                    deck.options().count,
                    deck.options().difficulty
                );
                println!("Use: select <ids..>, then generate [count] [difficulty]");
            }
            DeckStep::Study => {
                self.show_card();
                self.show_question();
            }
        }
    }

    fn show_card(&self) {
        let deck = self.app.deck();
        let Some(card) = deck.current_card() else {
            return;
        };
        let (pos, total) = deck.card_position();
        let face = if deck.is_flipped() { &card.answer } else { &card.question };
        println!("Card {}/{}: {}", pos, total, face);
    }

    fn show_question(&self) {
        let deck = self.app.deck();
        if deck.is_quiz_complete() {
            println!(
                "Quiz complete: {}/{} ({}%)",
                deck.score(),
                deck.quiz().len(),
                deck.score_percent()
            );
            return;
        }
        let Some(question) = deck.current_question() else {
            return;
        };
        let (pos, total) = deck.question_position();
        println!("Question {}/{}: {}", pos, total, question.question);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }
    }

    fn show_plan(&self) {
        let planner = self.app.planner();
        let Some(plan) = planner.plan() else {
            println!("No study plan yet. Use: plan <topic> | <duration> | <goals>");
            return;
        };
        println!("{}  ({:.0}% done)", plan.plan_title, planner.progress());
        for (d, day) in plan.schedule.iter().enumerate() {
            println!("{}. {}: {}", d + 1, day.period, day.topics.join(", "));
            for (t, task) in day.tasks.iter().enumerate() {
                let mark = if planner.is_checked(&day.period, &task.description) {
                    "x"
                } else {
                    " "
                };
                println!(
                    "   [{}] {}.{} {} {}",
                    mark,
                    d + 1,
                    t + 1,
                    task.task_type.icon(),
                    task.description
                );
            }
        }
    }

    fn show_timer(&self) {
        let timer = self.app.timer();
        let phase = match timer.phase() {
            Phase::Working => "Focus",
            Phase::OnBreak => "Break",
        };
        println!(
            "{} {} [{}]  work {}m / break {}m  sessions: {}",
            phase,
            timer.display(),
            if timer.is_running() { "running" } else { "paused" },
            timer.work_minutes(),
            timer.break_minutes(),
            timer.sessions_completed()
        );
        println!("{}", timer.message());

        let music = self.app.music();
        if let Some(url) = music.embed_url() {
            println!("Music: {}", url);
        } else if let Some(audio) = music.local_file() {
            println!("Music: {}", audio.name);
        } else if let Some(url) = music.background_url() {
            println!("Ambient ({}): {}", music.ambient(), url);
        }
    }

    fn show_chat(&self) {
        for message in self.app.chat_history() {
            print_message(message);
        }
        println!("Try asking:");
        for starter in prompts::PROMPT_STARTERS {
            println!("  ask {}", starter);
        }
    }
}

fn prompt(app: &AppController) {
    let label = match app.screen() {
        Screen::Landing => "landing",
        Screen::Main(view) => match view {
            View::Dashboard => "dashboard",
            View::Notes => "notes",
            View::Flashcards => "flashcards",
            View::Planner => "planner",
            View::Study => "study",
            View::Ask => "ask",
        },
    };
    print!("{}> ", label);
    std::io::stdout().flush().ok();
}

fn print_note(note: &studyforge_types::Note) {
    println!("# {} ({})", note.title(), note.id);
    println!("{}", note.content);
    if !note.summary.is_empty() {
        println!("--- summary ---\n{}", note.summary);
    }
}

fn print_message(message: &ChatMessage) {
    let who = if message.is_ai() { "AI" } else { "You" };
    println!("{}: {}", who, message.text);
}
