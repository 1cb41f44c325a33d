//! Remote action client contract tests
//!
//! Every action is a POST of `{token, action, payload}` to one endpoint; these
//! tests pin the request shape and the mapping of responses onto ActionError.

use schedule_bot::backend::{
    ActionClient, ActionError, NewSchedule, NotificationSettings, ScheduleBackend, ScheduleField,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "test-secret";

fn client(server: &MockServer) -> ActionClient {
    ActionClient::new(format!("{}/exec", server.uri()), SECRET, Duration::from_secs(5))
}

// ────────────────────────────────────────────────────────────────────────────
// Request shape
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_carries_token_action_and_empty_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(body_partial_json(json!({
            "token": SECRET,
            "action": "list",
            "payload": {}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "schedules": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server).invoke("list", None).await.unwrap();
    assert_eq!(response.get("success"), Some(&json!(true)));
}

#[tokio::test]
async fn test_edit_value_payload_uses_sheet_label() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "edit_value",
            "payload": {"id": 7, "field": "提出状況", "value": "提出済み"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    client(&server)
        .edit_value(7, ScheduleField::Status, "提出済み")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_settings_save_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "settings_save",
            "payload": {"NotificationDays": 2, "ChannelID": "123456789012345678"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let settings = NotificationSettings::new(2, "123456789012345678").unwrap();
    client(&server).save_settings(&settings).await.unwrap();
}

#[tokio::test]
async fn test_add_sends_all_columns_and_returns_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "action": "add",
            "payload": {
                "title": "Vlog #12",
                "shoot_date": "2025/10/01",
                "due_date": "",
                "file_url": "",
                "yt_url": ""
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "id": 12,
            "title": "Vlog #12"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let schedule = NewSchedule {
        title: "Vlog #12".to_string(),
        shoot_date: "2025/10/01".to_string(),
        ..NewSchedule::default()
    };
    let added = client(&server).add_schedule(&schedule).await.unwrap();
    assert_eq!(added.id, 12);
    assert_eq!(added.title.as_deref(), Some("Vlog #12"));
}

// ────────────────────────────────────────────────────────────────────────────
// Response parsing
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_parses_lenient_records() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "schedules": [
                {
                    "id": 1,
                    "title": "Intro",
                    "shoot_date": "2025/09/20",
                    "due_date": "2025-10-02",
                    "status": "未着手",
                    "file_url": "",
                    "yt_url": null
                },
                {
                    "id": "2",
                    "title": 2025,
                    "shoot_date": "",
                    "due_date": "",
                    "status": "",
                    "file_url": "https://files.example/x",
                    "yt_url": "None"
                }
            ]
        })))
        .mount(&server)
        .await;

    let records = client(&server).list_schedules().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title.as_deref(), Some("Intro"));
    assert_eq!(records[0].file_url, None);
    assert_eq!(records[1].id, 2);
    assert_eq!(records[1].title.as_deref(), Some("2025"));
    assert_eq!(records[1].status, None);
    assert_eq!(records[1].yt_url, None);
}

#[tokio::test]
async fn test_list_without_schedules_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    assert!(client(&server).list_schedules().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_settings_load_accepts_text_days() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({"action": "settings_load"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "settings": {"NotificationDays": "3", "ChannelID": 987654321}
        })))
        .mount(&server)
        .await;

    let settings = client(&server).load_settings().await.unwrap().unwrap();
    assert_eq!(settings.notification_days, 3);
    assert_eq!(settings.channel_id, "987654321");
}

#[tokio::test]
async fn test_settings_load_empty_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "settings": {}
        })))
        .mount(&server)
        .await;

    assert!(client(&server).load_settings().await.unwrap().is_none());
}

// ────────────────────────────────────────────────────────────────────────────
// Error mapping
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_backend_failure_message_is_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "ID 99 not found"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .edit_value(99, ScheduleField::Title, "x")
        .await
        .unwrap_err();
    assert!(matches!(err, ActionError::Backend(_)));
    assert_eq!(err.to_string(), "ID 99 not found");
}

#[tokio::test]
async fn test_backend_failure_without_message_gets_default() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let err = client(&server).invoke("list", None).await.unwrap_err();
    assert_eq!(err.to_string(), "不明なエラーが発生しました。");
}

#[tokio::test]
async fn test_http_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client(&server).list_schedules().await.unwrap_err();
    assert!(matches!(err, ActionError::Status(500)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Sign in</html>"))
        .mount(&server)
        .await;

    let err = client(&server).invoke("list", None).await.unwrap_err();
    assert!(matches!(err, ActionError::Decode(_)));
}

#[tokio::test]
async fn test_non_object_json_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3])))
        .mount(&server)
        .await;

    let err = client(&server).invoke("list", None).await.unwrap_err();
    assert!(matches!(err, ActionError::Decode(_)));
}

#[tokio::test]
async fn test_slow_backend_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = ActionClient::new(
        format!("{}/exec", server.uri()),
        SECRET,
        Duration::from_millis(300),
    );
    let err = client.invoke("list", None).await.unwrap_err();
    assert!(matches!(err, ActionError::Timeout(_)));
}
