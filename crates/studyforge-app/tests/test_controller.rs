use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use studyforge_app::capture::{CaptureDevice, CaptureKind, MediaBlob, CAMERA_DENIED};
use studyforge_app::confirm;
use studyforge_app::{AppController, AppError, QuickAction, Screen};
use studyforge_assistant::testing::{Reply, ScriptedClient};
use studyforge_assistant::{prompts, AssistantConfig, AssistantService};
use studyforge_llm::{StreamEvent, WebSource};
use studyforge_persist::{PersistClient, StorageBackend};
use studyforge_types::{FixedClock, Sender, View};

const PLAN_JSON: &str = r#"{"planTitle":"Cell Biology","schedule":[{"period":"Day 1","topics":["Organelles"],"tasks":[{"description":"Read chapter 3","type":"Read"},{"description":"Label a cell diagram","type":"Practice"}]}]}"#;

struct Harness {
    app: AppController,
    persist: PersistClient,
    client: Arc<ScriptedClient>,
}

fn harness() -> Harness {
    let persist = PersistClient::builder()
        .backend(StorageBackend::Memory)
        .build()
        .unwrap();
    persist.settings().set_credential("test-key").unwrap();

    let client = Arc::new(ScriptedClient::new());
    let assistant = AssistantService::from_client(AssistantConfig::default(), client.clone());
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap(),
    ));
    let app = AppController::new(persist.clone(), assistant, clock);
    Harness {
        app,
        persist,
        client,
    }
}

fn yes() -> impl FnMut(&str) -> bool {
    |_: &str| true
}

fn no() -> impl FnMut(&str) -> bool {
    |_: &str| false
}

fn done() -> StreamEvent {
    StreamEvent::Done {
        finish_reason: Some("STOP".into()),
    }
}

struct DeniedCamera {
    released: bool,
}

#[async_trait]
impl CaptureDevice for DeniedCamera {
    fn kind(&self) -> CaptureKind {
        CaptureKind::Camera
    }

    async fn acquire(&mut self) -> studyforge_app::error::Result<()> {
        Err(AppError::CaptureDenied(CAMERA_DENIED.to_string()))
    }

    async fn capture(&mut self) -> studyforge_app::error::Result<MediaBlob> {
        unreachable!("capture without acquire")
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[test]
fn test_without_credential_shows_landing() {
    let persist = PersistClient::builder()
        .backend(StorageBackend::Memory)
        .build()
        .unwrap();
    let clock = Arc::new(FixedClock::new(Utc::now()));
    let mut app = AppController::new(
        persist.clone(),
        AssistantService::new(AssistantConfig::default()),
        clock,
    );

    assert_eq!(app.start().unwrap(), Screen::Landing);
    assert!(matches!(
        app.submit_credential("   "),
        Err(AppError::InvalidCredential)
    ));
    assert_eq!(app.screen(), Screen::Landing);
    assert!(persist.settings().credential().is_none());
}

#[tokio::test]
async fn test_rejected_credential_keeps_working_client() {
    let mut h = harness();
    assert_eq!(h.app.start().unwrap(), Screen::Main(View::Dashboard));

    assert!(matches!(
        h.app.submit_credential("  "),
        Err(AppError::InvalidCredential)
    ));
    assert!(h.app.is_ready());
    assert_eq!(h.app.screen(), Screen::Main(View::Dashboard));
    assert_eq!(h.persist.settings().credential().as_deref(), Some("test-key"));

    h.client.push_text("A short summary.");
    h.app.new_note().unwrap();
    h.app.edit_note("Mitochondria make ATP.").unwrap();
    let note = h.app.summarize_active().await.unwrap().unwrap();
    assert_eq!(note.summary, "A short summary.");
    assert_eq!(h.client.call_count(), 1);
}

#[test]
fn test_clear_credential_needs_confirmation() {
    let mut h = harness();
    assert_eq!(h.app.start().unwrap(), Screen::Main(View::Dashboard));

    assert!(!h.app.clear_credential(&mut no()).unwrap());
    assert!(h.app.is_ready());

    let mut asked = String::new();
    let mut record = |message: &str| {
        asked = message.to_string();
        true
    };
    assert!(h.app.clear_credential(&mut record).unwrap());
    assert_eq!(asked, confirm::CLEAR_CREDENTIAL);
    assert_eq!(h.app.screen(), Screen::Landing);
    assert!(h.persist.settings().credential().is_none());
}

#[test]
fn test_reset_data_reloads_state_and_keeps_credential() {
    let mut h = harness();
    h.app.new_note().unwrap();
    h.app.edit_note("Photosynthesis").unwrap();
    h.app.navigate(View::Notes).unwrap();

    assert!(h.app.reset_data(&mut yes()).unwrap());
    assert!(h.app.notes().is_empty());
    assert!(h.app.notebook().active().is_none());
    assert_eq!(h.app.view(), View::Dashboard);
    assert!(h.app.is_ready());
    assert_eq!(h.persist.settings().credential().as_deref(), Some("test-key"));
}

#[test]
fn test_quick_action_creates_and_opens_note() {
    let mut h = harness();
    h.app.quick_action(QuickAction::NewNote).unwrap();
    assert_eq!(h.app.view(), View::Notes);
    assert_eq!(h.app.notes().len(), 1);
    assert_eq!(
        h.app.notebook().active().map(|n| n.id.clone()),
        Some(h.app.notes()[0].id.clone())
    );

    h.app.quick_action(QuickAction::NewSession).unwrap();
    assert_eq!(h.app.screen(), Screen::Main(View::Study));
}

#[tokio::test]
async fn test_summarize_skips_blank_note() {
    let mut h = harness();
    h.app.new_note().unwrap();
    assert!(h.app.summarize_active().await.unwrap().is_none());
    assert_eq!(h.client.call_count(), 0);

    h.client.push_text("- light reactions\n- Calvin cycle");
    h.app.edit_note("Photosynthesis has two stages").unwrap();
    let note = h.app.summarize_active().await.unwrap().unwrap();
    assert_eq!(note.summary, "- light reactions\n- Calvin cycle");
    assert_eq!(h.persist.notes().load_all()[0].summary, note.summary);
}

#[tokio::test]
async fn test_denied_camera_surfaces_alert_and_leaves_note() {
    let mut h = harness();
    h.app.new_note().unwrap();
    h.app.edit_note("before").unwrap();

    let mut camera = DeniedCamera { released: false };
    let err = h.app.capture_image(&mut camera).await.unwrap_err();
    assert_eq!(err.to_string(), CAMERA_DENIED);
    assert!(!camera.released);
    assert_eq!(h.app.notes()[0].content, "before");
    assert_eq!(h.client.call_count(), 0);
}

#[tokio::test]
async fn test_generate_deck_without_content_skips_model() {
    let mut h = harness();
    let note = h.app.new_note().unwrap();
    h.app.deck_mut().toggle_note(&note.id);

    assert!(matches!(h.app.generate_deck().await, Err(AppError::NoContent)));
    assert_eq!(h.client.call_count(), 0);
    assert!(h.app.deck().flashcards().is_empty());
}

#[tokio::test]
async fn test_generate_deck_respects_counts() {
    let mut h = harness();
    let note = h.app.new_note().unwrap();
    h.app.edit_note("The cell membrane is selectively permeable.").unwrap();

    let cards: Vec<String> = (1..=8)
        .map(|i| format!(r#"{{"question":"Q{i}","answer":"A{i}"}}"#))
        .collect();
    let quiz = r#"[{"question":"What controls entry?","options":["Membrane","Wall","Nucleus","Ribosome"],"correctAnswer":"Membrane"},{"question":"Broken","options":["a","b"],"correctAnswer":"a"}]"#;
    h.client
        .push_when("flashcards", Reply::Text(format!("[{}]", cards.join(","))))
        .push_when("multiple-choice quiz", Reply::Text(quiz.to_string()));

    let deck = h.app.deck_mut();
    deck.toggle_note(&note.id);
    assert!(deck.to_settings());
    deck.set_count(5);
    h.app.generate_deck().await.unwrap();

    assert_eq!(h.app.deck().flashcards().len(), 5);
    assert_eq!(h.app.deck().quiz().len(), 1);
    assert_eq!(h.client.call_count(), 2);

    let deck = h.app.deck_mut();
    assert_eq!(deck.answer("Membrane"), Some(true));
    assert!(deck.is_quiz_complete());
    assert_eq!(deck.score_percent(), 100);
}

#[tokio::test]
async fn test_plan_replacement_is_confirmed_and_failure_keeps_plan() {
    let mut h = harness();
    h.client.push_when("Cell Biology", Reply::Text(PLAN_JSON.to_string()));
    assert!(h
        .app
        .generate_plan("Cell Biology", "", "", &mut no())
        .await
        .unwrap());
    let request = &h.client.requests()[0];
    assert!(studyforge_assistant::testing::prompt_text(request).contains("1 week"));

    assert!(h.app.toggle_task(1, 2).unwrap());
    assert_eq!(h.app.planner().progress(), 50.0);

    // Declined: nothing sent
    assert!(!h
        .app
        .generate_plan("Genetics", "2 weeks", "", &mut no())
        .await
        .unwrap());
    assert_eq!(h.client.call_count(), 1);

    h.client.push_failure("quota exceeded");
    let err = h
        .app
        .generate_plan("Genetics", "2 weeks", "", &mut yes())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PlanGeneration));
    let plan = h.app.planner().plan().unwrap();
    assert_eq!(plan.plan_title, "Cell Biology");
    assert_eq!(h.app.planner().progress(), 50.0);

    assert!(h.app.reset_plan_progress(&mut yes()).unwrap());
    assert_eq!(h.app.planner().progress(), 0.0);
    assert!(matches!(
        h.app.toggle_task(0, 1),
        Err(AppError::TaskNotFound { .. })
    ));
}

#[test]
fn test_full_work_phase_records_one_session() {
    let mut h = harness();
    h.app.timer_mut().start();
    for _ in 0..1500 {
        assert!(h.app.tick_timer().unwrap().is_none());
    }
    assert_eq!(h.app.timer().display(), "00:00");
    assert!(h.app.session_logs().is_empty());

    h.app.tick_timer().unwrap();
    assert_eq!(h.app.timer().display(), "05:00");
    assert_eq!(h.app.session_logs().len(), 1);
    assert_eq!(h.app.session_logs()[0].duration, 25);
    assert_eq!(h.persist.sessions().load().len(), 1);
    assert_eq!(h.app.dashboard().total_minutes, 25);
}

#[tokio::test]
async fn test_chat_stream_builds_single_reply_with_unique_sources() {
    let mut h = harness();
    let opened = h.app.open_chat().unwrap().to_vec();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].text, prompts::CHAT_GREETING);

    h.client.push(Reply::Stream(vec![
        StreamEvent::message("Enzymes "),
        StreamEvent::Grounding {
            sources: vec![
                WebSource::new("https://enzymes.example", None),
                WebSource::new("https://enzymes.example", Some("Enzymes".into())),
            ],
        },
        StreamEvent::message("lower activation energy."),
        done(),
    ]));

    let mut updates = 0;
    let sent = h
        .app
        .send_chat("What do enzymes do?", true, |_| updates += 1)
        .await
        .unwrap();
    assert!(sent);
    assert!(updates >= 3);

    let history = h.app.chat_history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].sender, Sender::User);
    assert_eq!(history[2].text, "Enzymes lower activation energy.");
    let sources = history[2].sources.as_ref().unwrap();
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].title, "https://enzymes.example");
    assert_eq!(h.persist.chat().load(), history);
}

#[tokio::test]
async fn test_chat_failure_leaves_one_error_reply() {
    let mut h = harness();
    h.app.navigate(View::Ask).unwrap();
    assert!(!h.app.send_chat("   ", false, |_| {}).await.unwrap());

    h.client.push(Reply::BrokenStream(
        vec![StreamEvent::message("Partial")],
        "connection reset".into(),
    ));
    h.app.send_chat("Explain osmosis", false, |_| {}).await.unwrap();

    let history = h.app.chat_history();
    let replies: Vec<_> = history.iter().skip(1).filter(|m| m.is_ai()).collect();
    assert_eq!(history.len(), 3);
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, prompts::CHAT_REPLY_ERROR);
}

#[test]
fn test_music_embed_survives_reload() {
    let mut h = harness();
    let embed = h
        .app
        .load_music("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M")
        .unwrap();
    assert_eq!(
        embed.url,
        "https://open.spotify.com/embed/playlist/37i9dQZF1DXcBWIGoYBM5M"
    );
    assert!(matches!(
        h.app.load_music("https://example.com/song"),
        Err(AppError::UnsupportedEmbed)
    ));

    h.app.reset_data(&mut yes()).unwrap();
    assert_eq!(h.app.music().embed_url(), Some(embed.url.as_str()));
}
