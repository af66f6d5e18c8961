use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use studyforge_app::{AppController, FocusTimer, Screen};
use studyforge_assistant::AssistantService;
use studyforge_persist::{PersistClient, StorageBackend};
use studyforge_types::SystemClock;

mod commands;
mod config;
mod repl;
mod ticker;

use crate::config::Config;
use crate::repl::Repl;

/// StudyForge - AI study assistant in your terminal
#[derive(Parser, Debug)]
#[command(name = "studyforge")]
#[command(about = "Notes, flashcards, quizzes, study plans and a focus timer backed by Gemini")]
struct Args {
    /// Extra TOML config file, layered over the defaults
    #[arg(long, env = "STUDYFORGE_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for stored data
    #[arg(long, env = "STUDYFORGE_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref(), args.data_dir.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    init_logging(&config);

    tracing::info!(model = %config.assistant.model, "Starting StudyForge");

    let backend: StorageBackend = config.storage.backend.parse()?;
    let mut builder = PersistClient::builder().backend(backend);
    if let Some(dir) = config.storage.resolved_data_dir() {
        tracing::info!(dir = %dir.display(), "Using data directory");
        builder = builder.data_dir(dir);
    }
    let persist = builder.build().context("Failed to open the data store")?;

    let assistant = AssistantService::new(config.assistant.clone());
    let timer = FocusTimer::new(config.timer.work_minutes, config.timer.break_minutes);
    let mut app =
        AppController::new(persist, assistant, Arc::new(SystemClock)).with_timer(timer);

    match app.start() {
        Ok(Screen::Landing) => {
            if let Some(key) = &config.gemini_api_key {
                if let Err(e) = app.submit_credential(key) {
                    println!("{}", e);
                }
            }
        }
        Ok(_) => {}
        Err(e) => println!("{}", e),
    }

    Repl::new(app).run().await?;

    tracing::info!("Goodbye");
    Ok(())
}

fn init_logging(config: &Config) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
}
