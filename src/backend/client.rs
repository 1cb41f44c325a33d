//! Remote action client
//!
//! Every backend operation is a POST of `{token, action, payload}` to one
//! endpoint. The response is a JSON object with `success: true` plus
//! action-specific fields, or `success: false` with an `error` message.
//! All transport and decoding failures are folded into [`ActionError`].
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Bound every call with a request timeout
//! - 1.0.0: Initial implementation

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::{json, Map, Value};
use std::time::Duration;
use thiserror::Error;

use super::models::{
    AddedSchedule, NewSchedule, NotificationSettings, ScheduleField, ScheduleRecord,
};

pub const ACTION_SETTINGS_LOAD: &str = "settings_load";
pub const ACTION_SETTINGS_SAVE: &str = "settings_save";
pub const ACTION_LIST: &str = "list";
pub const ACTION_ADD: &str = "add";
pub const ACTION_EDIT_VALUE: &str = "edit_value";

/// Fallback when the backend reports failure without a message
const UNKNOWN_BACKEND_ERROR: &str = "不明なエラーが発生しました。";

/// Uniform failure shape for remote actions
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("backend request failed: {0}")]
    Transport(String),

    #[error("backend request timed out after {0} seconds")]
    Timeout(u64),

    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("backend response was not valid JSON: {0}")]
    Decode(String),

    /// `success: false`; the message is shown to users as-is
    #[error("{0}")]
    Backend(String),
}

impl ActionError {
    pub fn is_transport(&self) -> bool {
        !matches!(self, ActionError::Backend(_))
    }
}

/// Typed view of the actions this bot uses
#[async_trait]
pub trait ScheduleBackend: Send + Sync {
    /// `settings_load`; `Ok(None)` means nothing usable is stored
    async fn load_settings(&self) -> Result<Option<NotificationSettings>, ActionError>;

    /// `settings_save`
    async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), ActionError>;

    /// `list`
    async fn list_schedules(&self) -> Result<Vec<ScheduleRecord>, ActionError>;

    /// `add`
    async fn add_schedule(&self, schedule: &NewSchedule) -> Result<AddedSchedule, ActionError>;

    /// `edit_value`
    async fn edit_value(
        &self,
        schedule_id: i64,
        field: ScheduleField,
        value: &str,
    ) -> Result<(), ActionError>;
}

/// HTTP client for the schedule backend
#[derive(Clone)]
pub struct ActionClient {
    http: reqwest::Client,
    endpoint: String,
    secret: String,
    timeout: Duration,
}

impl ActionClient {
    pub fn new(endpoint: impl Into<String>, secret: impl Into<String>, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            secret: secret.into(),
            timeout,
        }
    }

    /// Send one action. There are no retries.
    pub async fn invoke(
        &self,
        action: &str,
        payload: Option<Value>,
    ) -> Result<Map<String, Value>, ActionError> {
        let body = json!({
            "token": self.secret,
            "action": action,
            "payload": payload.unwrap_or_else(|| json!({})),
        });

        debug!("Invoking backend action '{action}'");

        let response = self
            .http
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(action, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Backend action '{action}' returned HTTP {status}");
            return Err(ActionError::Status(status.as_u16()));
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(action, e))?;

        let object = match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(ActionError::Decode(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )))
            }
            Err(e) => return Err(ActionError::Decode(e.to_string())),
        };

        if object.get("success").and_then(Value::as_bool) == Some(true) {
            Ok(object)
        } else {
            let message = object
                .get("error")
                .and_then(Value::as_str)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(UNKNOWN_BACKEND_ERROR)
                .to_string();
            debug!("Backend action '{action}' reported failure: {message}");
            Err(ActionError::Backend(message))
        }
    }

    fn transport_error(&self, action: &str, e: reqwest::Error) -> ActionError {
        if e.is_timeout() {
            warn!("Backend action '{action}' timed out");
            ActionError::Timeout(self.timeout.as_secs())
        } else {
            warn!("Backend action '{action}' failed: {e}");
            ActionError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl ScheduleBackend for ActionClient {
    async fn load_settings(&self) -> Result<Option<NotificationSettings>, ActionError> {
        let response = self.invoke(ACTION_SETTINGS_LOAD, None).await?;
        Ok(response
            .get("settings")
            .and_then(NotificationSettings::from_wire))
    }

    async fn save_settings(&self, settings: &NotificationSettings) -> Result<(), ActionError> {
        let payload =
            serde_json::to_value(settings).map_err(|e| ActionError::Decode(e.to_string()))?;
        self.invoke(ACTION_SETTINGS_SAVE, Some(payload)).await?;
        Ok(())
    }

    async fn list_schedules(&self) -> Result<Vec<ScheduleRecord>, ActionError> {
        let mut response = self.invoke(ACTION_LIST, None).await?;
        match response.remove("schedules") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(schedules) => {
                serde_json::from_value(schedules).map_err(|e| ActionError::Decode(e.to_string()))
            }
        }
    }

    async fn add_schedule(&self, schedule: &NewSchedule) -> Result<AddedSchedule, ActionError> {
        let payload =
            serde_json::to_value(schedule).map_err(|e| ActionError::Decode(e.to_string()))?;
        let response = self.invoke(ACTION_ADD, Some(payload)).await?;
        serde_json::from_value(Value::Object(response))
            .map_err(|e| ActionError::Decode(e.to_string()))
    }

    async fn edit_value(
        &self,
        schedule_id: i64,
        field: ScheduleField,
        value: &str,
    ) -> Result<(), ActionError> {
        let payload = json!({
            "id": schedule_id,
            "field": field.sheet_label(),
            "value": value,
        });
        self.invoke(ACTION_EDIT_VALUE, Some(payload)).await?;
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
