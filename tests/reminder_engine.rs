//! Reminder engine end-to-end tests
//!
//! Real ActionClient against a mock backend, with a recording sink in place
//! of Discord.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use schedule_bot::backend::{ActionClient, NotificationSettings, ScheduleBackend};
use schedule_bot::features::reminders::{
    ConfigureError, FiringOutcome, ReminderDigest, ReminderJob, ReminderScheduler, ReminderSink,
    SettingsCache,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingSink {
    sent: Mutex<Vec<(u64, ReminderDigest)>>,
}

impl RecordingSink {
    fn sent(&self) -> Vec<(u64, ReminderDigest)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReminderSink for RecordingSink {
    async fn deliver(&self, channel_id: u64, digest: &ReminderDigest) -> Result<()> {
        self.sent.lock().unwrap().push((channel_id, digest.clone()));
        Ok(())
    }
}

fn backend(server: &MockServer) -> Arc<dyn ScheduleBackend> {
    Arc::new(ActionClient::new(
        format!("{}/exec", server.uri()),
        "secret",
        Duration::from_secs(5),
    ))
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()
}

fn configured(days: u32) -> Arc<SettingsCache> {
    Arc::new(SettingsCache::with_settings(
        NotificationSettings::new(days, "555").unwrap(),
    ))
}

async fn mount_reference_list(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"action": "list"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "schedules": [
                {"id": 1, "title": "A", "due_date": "2025-10-02", "status": "未着手"},
                {"id": 2, "title": "B", "due_date": "2025-10-03", "status": "未着手"},
                {"id": 3, "title": "C", "due_date": "2025-10-05", "status": "未着手"},
                {"id": 4, "title": "D", "due_date": "2025-09-30", "status": "未着手"},
                {"id": 5, "title": "E", "due_date": "2025-10-02", "status": "提出済み"}
            ]
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_reference_scenario_sends_one_digest() {
    let server = MockServer::start().await;
    mount_reference_list(&server, 1).await;

    let sink = Arc::new(RecordingSink::default());
    let job = ReminderJob::new(backend(&server), configured(2), sink.clone());

    assert_eq!(job.fire_on(today()).await, FiringOutcome::Delivered(2));

    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    let (channel_id, digest) = &sent[0];
    assert_eq!(*channel_id, 555);
    assert_eq!(digest.threshold_days, 2);
    let selected: Vec<(i64, i64)> = digest
        .items
        .iter()
        .map(|item| (item.record.id, item.days_left))
        .collect();
    assert_eq!(selected, vec![(1, 1), (2, 2)]);
}

#[tokio::test]
async fn test_unconfigured_firing_makes_no_remote_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let job = ReminderJob::new(backend(&server), Arc::new(SettingsCache::new()), sink.clone());

    assert_eq!(job.fire_on(today()).await, FiringOutcome::Unconfigured);
    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn test_list_failure_sends_nothing_and_keeps_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"action": "list"})))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let settings = configured(3);
    let sink = Arc::new(RecordingSink::default());
    let job = ReminderJob::new(backend(&server), Arc::clone(&settings), sink.clone());

    assert_eq!(job.fire_on(today()).await, FiringOutcome::FetchFailed);
    assert!(sink.sent().is_empty());
    assert_eq!(
        settings.get().await,
        NotificationSettings::new(3, "555")
    );
}

#[tokio::test]
async fn test_backend_reported_list_error_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "シートが見つかりません"
        })))
        .mount(&server)
        .await;

    let sink = Arc::new(RecordingSink::default());
    let job = ReminderJob::new(backend(&server), configured(3), sink.clone());

    assert_eq!(job.fire_on(today()).await, FiringOutcome::FetchFailed);
    assert!(sink.sent().is_empty());
}

#[tokio::test]
async fn test_settings_load_then_fire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"action": "settings_load"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "settings": {"NotificationDays": "2", "ChannelID": "555"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_reference_list(&server, 1).await;

    let backend = backend(&server);
    let settings = Arc::new(SettingsCache::new());
    let loaded = settings.load(backend.as_ref()).await;
    assert_eq!(loaded, NotificationSettings::new(2, "555"));

    let sink = Arc::new(RecordingSink::default());
    let job = ReminderJob::new(backend, settings, sink.clone());
    assert_eq!(job.fire_on(today()).await, FiringOutcome::Delivered(2));
}

#[tokio::test]
async fn test_failed_save_leaves_cache_and_timer_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"action": "settings_save"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "Invalid token"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = configured(4);
    let scheduler = ReminderScheduler::new(
        backend(&server),
        Arc::clone(&settings),
        Arc::new(RecordingSink::default()),
        Duration::from_secs(24 * 60 * 60),
    );

    let err = scheduler.configure(5, "123").await.unwrap_err();
    assert!(matches!(err, ConfigureError::Backend(_)));
    assert_eq!(err.to_string(), "Invalid token");
    assert_eq!(settings.get().await, NotificationSettings::new(4, "555"));
    assert!(!scheduler.is_armed().await);
}

#[tokio::test]
async fn test_non_positive_days_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let scheduler = ReminderScheduler::new(
        backend(&server),
        Arc::new(SettingsCache::new()),
        Arc::new(RecordingSink::default()),
        Duration::from_secs(24 * 60 * 60),
    );

    assert!(matches!(
        scheduler.configure(0, "123").await,
        Err(ConfigureError::InvalidDays)
    ));
    assert!(matches!(
        scheduler.configure(-3, "123").await,
        Err(ConfigureError::InvalidDays)
    ));
    assert!(!scheduler.is_armed().await);
}

#[tokio::test]
async fn test_successful_configure_persists_then_caches_then_arms() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "settings_save",
            "payload": {"NotificationDays": 5, "ChannelID": "123"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;
    // The freshly armed timer fires straight away
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"action": "list"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "schedules": []
        })))
        .mount(&server)
        .await;

    let settings = Arc::new(SettingsCache::new());
    let scheduler = ReminderScheduler::new(
        backend(&server),
        Arc::clone(&settings),
        Arc::new(RecordingSink::default()),
        Duration::from_secs(24 * 60 * 60),
    );

    let saved = scheduler.configure(5, "123").await.unwrap();
    assert_eq!(Some(saved), NotificationSettings::new(5, "123"));
    assert_eq!(settings.get().await, NotificationSettings::new(5, "123"));
    assert!(scheduler.is_armed().await);
}
