use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use studyforge_assistant::testing::ScriptedClient;
use studyforge_assistant::{prompts, AssistantConfig, AssistantService, DailyTipCache};
use studyforge_persist::{PersistClient, StorageBackend};
use studyforge_types::FixedClock;

fn setup() -> (Arc<ScriptedClient>, AssistantService, DailyTipCache, Arc<FixedClock>) {
    let client = Arc::new(ScriptedClient::new());
    let service = AssistantService::from_client(AssistantConfig::default(), client.clone());
    let persist = PersistClient::builder()
        .backend(StorageBackend::Memory)
        .build()
        .unwrap();
    let clock = Arc::new(FixedClock::new(
        Utc.with_ymd_and_hms(2024, 9, 2, 8, 0, 0).unwrap(),
    ));
    let cache = DailyTipCache::new(persist.tip().clone(), clock.clone());
    (client, service, cache, clock)
}

#[tokio::test]
async fn test_tip_is_fetched_once_per_day() {
    let (client, service, cache, clock) = setup();
    client.push_text("Teach it to someone else.");
    client.push_text("Sleep before exams.");

    for _ in 0..3 {
        assert_eq!(cache.get(&service).await.unwrap(), "Teach it to someone else.");
    }
    assert_eq!(client.call_count(), 1);

    clock.advance(Duration::days(1));
    assert_eq!(cache.get(&service).await.unwrap(), "Sleep before exams.");
    assert_eq!(client.call_count(), 2);
}

#[tokio::test]
async fn test_fallback_tip_is_kept_for_the_day() {
    let (client, service, cache, clock) = setup();
    client.push_failure("offline");
    client.push_text("Use active recall.");

    for _ in 0..3 {
        assert_eq!(cache.get(&service).await.unwrap(), prompts::TIP_FALLBACK);
    }
    assert_eq!(client.call_count(), 1);

    clock.advance(Duration::days(1));
    assert_eq!(cache.get(&service).await.unwrap(), "Use active recall.");
    assert_eq!(client.call_count(), 2);
}
