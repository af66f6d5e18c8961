use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use studyforge_app::AmbientSound;
use studyforge_types::{Difficulty, View};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Next,
    Prev,
    Flip,
    Shuffle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerAction {
    Status,
    Start,
    Pause,
    Reset,
    Preset(String),
    Work(u32),
    Break(u32),
}

/// One line of user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Key(String),
    KeyClear,
    Reset,
    View(View),
    Dashboard,
    NewNote,
    Notes { query: String, tag: Option<String> },
    Open(String),
    Close,
    Edit(String),
    Tag(String),
    Untag(String),
    Summarize,
    Delete(String),
    Scan(PathBuf),
    Voice(PathBuf),
    Select(Vec<String>),
    Generate {
        count: Option<usize>,
        difficulty: Option<Difficulty>,
    },
    Card(CardAction),
    Answer(usize),
    QuizRestart,
    Plan {
        topic: String,
        duration: String,
        goals: String,
    },
    Check { day: usize, task: usize },
    ProgressReset,
    Timer(TimerAction),
    Music(String),
    MusicFile(PathBuf),
    Ambient(AmbientSound),
    Ask { text: String, web_search: bool },
    Tip,
    Help,
    Quit,
}

impl Command {
    /// Commands allowed before a credential is accepted
    pub fn allowed_on_landing(&self) -> bool {
        matches!(self, Self::Key(_) | Self::Help | Self::Quit)
    }
}

pub const HELP: &str = "\
Commands:
  key <credential> | key clear      set or forget the Gemini API key
  reset                             delete notes, sessions, chat and plan
  view <name> | dashboard           dashboard, notes, flashcards, planner, study, ask
  new-note | open <id> | close      create or open a note
  notes [query] [#tag]              list notes, newest first
  edit <text> | tag <t> | untag <t> edit the open note
  summarize | delete <id>           summarize the open note, delete a note
  scan <image> | voice <audio>      append text from a photo or recording
  select <ids..>                    toggle notes for flashcards and quiz
  generate [count] [difficulty]     build flashcards and a quiz
  card next|prev|flip|shuffle       flashcard navigation
  answer <n> | quiz restart         answer the current quiz question
  plan <topic> | <duration> | <goals>
  check <day#> <task#> | progress reset
  timer [start|pause|reset|preset <name>|work <m>|break <m>]
  music <url> | music file <path>    play a link or a local audio file
  ambient none|rain|cafe            looping background sound
  ask [--search] <text> | tip
  help | quit";

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        bail!("usage: {}", usage);
    }
    Ok(rest)
}

fn number<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| anyhow!("{} must be a number, got '{}'", what, raw))
}

pub fn parse(line: &str) -> Result<Command> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_lowercase().as_str() {
        "key" if rest.eq_ignore_ascii_case("clear") => Command::KeyClear,
        "key" => Command::Key(required(rest, "key <credential>")?.to_string()),
        "reset" => Command::Reset,
        "view" => Command::View(
            required(rest, "view <name>")?
                .parse()
                .map_err(anyhow::Error::msg)?,
        ),
        "dashboard" => Command::Dashboard,
        "new-note" | "new" => Command::NewNote,
        "notes" => parse_notes(rest),
        "open" => Command::Open(required(rest, "open <id>")?.to_string()),
        "close" => Command::Close,
        "edit" => Command::Edit(rest.replace("\\n", "\n")),
        "tag" => Command::Tag(required(rest, "tag <tag>")?.to_string()),
        "untag" => Command::Untag(required(rest, "untag <tag>")?.to_string()),
        "summarize" => Command::Summarize,
        "delete" => Command::Delete(required(rest, "delete <id>")?.to_string()),
        "scan" => Command::Scan(PathBuf::from(required(rest, "scan <image-path>")?)),
        "voice" => Command::Voice(PathBuf::from(required(rest, "voice <audio-path>")?)),
        "select" => Command::Select(
            required(rest, "select <ids..>")?
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        ),
        "generate" => parse_generate(rest)?,
        "card" => Command::Card(match rest.to_lowercase().as_str() {
            "next" | "n" => CardAction::Next,
            "prev" | "p" => CardAction::Prev,
            "flip" | "f" => CardAction::Flip,
            "shuffle" => CardAction::Shuffle,
            _ => bail!("usage: card next|prev|flip|shuffle"),
        }),
        "answer" => Command::Answer(number(required(rest, "answer <n>")?, "answer")?),
        "quiz" if rest.eq_ignore_ascii_case("restart") => Command::QuizRestart,
        "plan" => parse_plan(required(rest, "plan <topic> | <duration> | <goals>")?),
        "check" => {
            let mut parts = rest.split_whitespace();
            let (Some(day), Some(task)) = (parts.next(), parts.next()) else {
                bail!("usage: check <day#> <task#>");
            };
            Command::Check {
                day: number(day, "day")?,
                task: number(task, "task")?,
            }
        }
        "progress" if rest.eq_ignore_ascii_case("reset") => Command::ProgressReset,
        "timer" => Command::Timer(parse_timer(rest)?),
        "music" => parse_music(required(rest, "music <url> | music file <path>")?)?,
        "ambient" => Command::Ambient(
            required(rest, "ambient none|rain|cafe")?
                .parse()
                .map_err(anyhow::Error::msg)?,
        ),
        "ask" => parse_ask(rest)?,
        "tip" => Command::Tip,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command '{}', type 'help'", other),
    };
    Ok(command)
}

fn parse_notes(rest: &str) -> Command {
    let mut query = Vec::new();
    let mut tag = None;
    for word in rest.split_whitespace() {
        match word.strip_prefix('#') {
            Some(t) if !t.is_empty() => tag = Some(t.to_lowercase()),
            _ => query.push(word),
        }
    }
    Command::Notes {
        query: query.join(" "),
        tag,
    }
}

fn parse_generate(rest: &str) -> Result<Command> {
    let mut count = None;
    let mut difficulty = None;
    for word in rest.split_whitespace() {
        if let Ok(n) = word.parse::<usize>() {
            count = Some(n);
        } else {
            difficulty = Some(word.parse().map_err(anyhow::Error::msg)?);
        }
    }
    Ok(Command::Generate { count, difficulty })
}

fn parse_plan(rest: &str) -> Command {
    let mut fields = rest.splitn(3, '|').map(str::trim);
    Command::Plan {
        topic: fields.next().unwrap_or_default().to_string(),
        duration: fields.next().unwrap_or_default().to_string(),
        goals: fields.next().unwrap_or_default().to_string(),
    }
}

fn parse_music(rest: &str) -> Result<Command> {
    match rest.split_once(char::is_whitespace) {
        Some((mode, path)) if mode.eq_ignore_ascii_case("file") => {
            Ok(Command::MusicFile(PathBuf::from(path.trim())))
        }
        _ if rest.eq_ignore_ascii_case("file") => bail!("usage: music file <path>"),
        _ => Ok(Command::Music(rest.to_string())),
    }
}

fn parse_timer(rest: &str) -> Result<TimerAction> {
    let (action, arg) = match rest.split_once(char::is_whitespace) {
        Some((action, arg)) => (action, arg.trim()),
        None => (rest, ""),
    };
    Ok(match action.to_lowercase().as_str() {
        "" | "status" => TimerAction::Status,
        "start" => TimerAction::Start,
        "pause" | "stop" => TimerAction::Pause,
        "reset" => TimerAction::Reset,
        "preset" => TimerAction::Preset(required(arg, "timer preset <name>")?.to_string()),
        "work" => TimerAction::Work(number(required(arg, "timer work <minutes>")?, "minutes")?),
        "break" => {
            TimerAction::Break(number(required(arg, "timer break <minutes>")?, "minutes")?)
        }
        other => bail!("unknown timer action '{}'", other),
    })
}

fn parse_ask(rest: &str) -> Result<Command> {
    let (web_search, text) = match rest.strip_prefix("--search") {
        Some(text) => (true, text.trim()),
        None => (false, rest),
    };
    let text = required(text, "ask [--search] <text>")?;
    Ok(Command::Ask {
        text: text.to_string(),
        web_search,
    })
}
