use chrono::{TimeZone, Utc};
use studyforge_persist::{keys, DailyTip, KeyValueStore, PersistClient, StorageBackend};
use studyforge_types::{ChatMessage, Note, SessionLog, StudyPlan};
use tempfile::tempdir;

fn populated(client: &PersistClient) {
    let mut note = Note::new("1700000000000");
    note.content = "Photosynthesis".to_string();
    client.notes().upsert(note).unwrap();

    let at = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    client.sessions().record(SessionLog::completed_at(at, 25)).unwrap();
    client.chat().save(&[ChatMessage::user("hi")]).unwrap();
    client
        .plan()
        .save_plan(&StudyPlan {
            plan_title: "Biology".to_string(),
            schedule: Vec::new(),
        })
        .unwrap();
    client.plan().toggle_task("Day 1-Read").unwrap();
    client.settings().set_credential("secret").unwrap();
    client.settings().set_music_embed_url(Some("https://open.spotify.com/embed/track/x")).unwrap();
    client.tip().save(&DailyTip::new("Sleep well", "2024-03-01")).unwrap();
}

#[test]
fn test_reset_data_keeps_credential_tip_and_music() {
    let client = PersistClient::builder()
        .backend(StorageBackend::Memory)
        .build()
        .unwrap();
    populated(&client);

    client.reset_data().unwrap();

    assert!(client.notes().load_all().is_empty());
    assert!(client.sessions().load().is_empty());
    assert!(client.chat().load().is_empty());
    assert!(client.plan().load_plan().is_none());
    assert!(client.plan().checked_tasks().is_empty());
    assert_eq!(client.settings().credential().as_deref(), Some("secret"));
    assert!(client.settings().music_embed_url().is_some());
    assert!(client.tip().load().is_some());
}

#[test]
fn test_clear_credential_removes_only_the_key() {
    let dir = tempdir().unwrap();
    let client = PersistClient::builder().data_dir(dir.path()).build().unwrap();
    populated(&client);

    client.clear_credential().unwrap();

    assert!(client.settings().credential().is_none());
    assert_eq!(client.notes().load_all().len(), 1);
    let stored = client.store().keys().unwrap();
    assert!(!stored.iter().any(|k| k == keys::API_KEY));
    assert!(stored.iter().all(|k| k.starts_with(keys::PREFIX)));
}

#[test]
fn test_file_backend_requires_data_dir() {
    assert!(PersistClient::builder().build().is_err());
}

#[test]
fn test_sessions_are_most_recent_first() {
    let client = PersistClient::builder()
        .backend(StorageBackend::Memory)
        .build()
        .unwrap();
    let first = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let second = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
    client.sessions().record(SessionLog::completed_at(first, 25)).unwrap();
    let logs = client.sessions().record(SessionLog::completed_at(second, 50)).unwrap();
    assert_eq!(logs[0].duration, 50);
    assert_eq!(logs[1].duration, 25);
}
