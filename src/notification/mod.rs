//! # Assignment Notifications

//! Best-effort delivery of assignment notices (SMS gateway / printed receipt) after a
//! permit has committed. Failure here is reported to the operator and logged; it never
//! rolls back the assignment.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::info;
use crate::config::NotificationSettings;
use crate::errors::{CheckInError, CheckInResult};

/// The flat summary handed to the notification collaborator once an assignment commits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentNotice {
    /// Dock display name ("Dock 12" or "Ramp").
    pub dock_display: String,
    pub driver_name: String,
    pub reference_number: String,
    /// Formatted appointment time ("08:00") or the symbolic code, when one is recorded.
    pub appointment_display: Option<String>,
}

/// Defines the notification collaborator interface.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_assignment_notice(&self, notice: &AssignmentNotice) -> CheckInResult<()>;
}

/// Posts assignment notices to a configured webhook as JSON.
pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
}

impl WebhookNotifier {
    /// Builds a notifier from the notification settings; `None` when no webhook URL is
    /// configured, in which case notices are logged and dropped.
    pub fn from_settings(settings: &NotificationSettings) -> CheckInResult<Option<Self>> {
        let url = match &settings.webhook_url {
            Some(url) => url.clone(),
            None => return Ok(None),
        };
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;
        Ok(Some(WebhookNotifier { client, webhook_url: url }))
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send_assignment_notice(&self, notice: &AssignmentNotice) -> CheckInResult<()> {
        let payload = json!({
            "type": "dock_assignment",
            "dock": notice.dock_display,
            "driver": notice.driver_name,
            "reference": notice.reference_number,
            "appointment": notice.appointment_display,
        });

        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CheckInError::NotificationError(format!(
                "webhook returned {}",
                response.status()
            )));
        }
        Ok(())
    }
}

/// Logs notices without delivering them. Used in tests and when no webhook is
/// configured.
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_assignment_notice(&self, notice: &AssignmentNotice) -> CheckInResult<()> {
        info!(
            dock = %notice.dock_display,
            driver = %notice.driver_name,
            reference = %notice.reference_number,
            "assignment notice (no notifier configured)"
        );
        Ok(())
    }
}
