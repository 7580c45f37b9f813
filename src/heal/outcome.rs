// ABOUTME: Structured outcome of one heal invocation.
// ABOUTME: Built once, stamped with the current UTC time, then rendered or logged.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alert::AlertPayload;
use crate::types::ResourceRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    NoActionNeeded,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ContainerRestarted,
    HealthCheckPassed,
    Aborted,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealOutcome {
    pub status: OutcomeStatus,
    pub action: Action,
    pub timestamp: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub health_status: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_restart_health: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_restart_health: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_data: Option<AlertPayload>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealOutcome {
    /// The service was healthy and the alert (if any) was not critical.
    pub fn no_action(
        resource: &ResourceRef,
        health_status: bool,
        alert_data: Option<AlertPayload>,
    ) -> Self {
        Self {
            status: OutcomeStatus::NoActionNeeded,
            action: Action::HealthCheckPassed,
            timestamp: Utc::now(),
            container_group: Some(resource.container_group.to_string()),
            resource_group: Some(resource.resource_group.to_string()),
            health_status: Some(health_status),
            pre_restart_health: None,
            post_restart_health: None,
            alert_data,
            error: None,
        }
    }

    /// The restart went through. `post_restart_health: Some(false)` means
    /// verification ran out of attempts, which does not make this an error.
    pub fn restarted(
        resource: &ResourceRef,
        pre_restart_health: Option<bool>,
        post_restart_health: Option<bool>,
        alert_data: Option<AlertPayload>,
    ) -> Self {
        Self {
            status: OutcomeStatus::Success,
            action: Action::ContainerRestarted,
            timestamp: Utc::now(),
            container_group: Some(resource.container_group.to_string()),
            resource_group: Some(resource.resource_group.to_string()),
            health_status: None,
            pre_restart_health,
            post_restart_health,
            alert_data,
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Error,
            action: Action::Aborted,
            timestamp: Utc::now(),
            container_group: None,
            resource_group: None,
            health_status: None,
            pre_restart_health: None,
            post_restart_health: None,
            alert_data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == OutcomeStatus::Error
    }

    /// Status code for an HTTP transport: 500 for errors, 200 otherwise.
    pub fn http_status(&self) -> u16 {
        if self.is_error() { 500 } else { 200 }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContainerGroupName, ResourceGroupName};
    use serde_json::{Value, json};

    fn resource() -> ResourceRef {
        ResourceRef::new(
            "sub",
            ResourceGroupName::new("autoscale-rg").unwrap(),
            ContainerGroupName::new("healthcheck-aci").unwrap(),
        )
    }

    #[test]
    fn restarted_shape() {
        let outcome = HealOutcome::restarted(&resource(), Some(false), Some(true), None);
        let value: Value = serde_json::from_str(&outcome.to_json().unwrap()).unwrap();

        assert_eq!(value["status"], "success");
        assert_eq!(value["action"], "container_restarted");
        assert_eq!(value["container_group"], "healthcheck-aci");
        assert_eq!(value["resource_group"], "autoscale-rg");
        assert_eq!(value["pre_restart_health"], false);
        assert_eq!(value["post_restart_health"], true);
        assert!(value.get("alert_data").is_none());
        assert!(value.get("error").is_none());
        assert_eq!(outcome.http_status(), 200);
    }

    #[test]
    fn no_action_echoes_alert() {
        let alert = AlertPayload::new(json!({ "data": { "essentials": { "severity": "Sev3" } } }));
        let outcome = HealOutcome::no_action(&resource(), true, Some(alert));
        let value: Value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["status"], "no_action_needed");
        assert_eq!(value["action"], "health_check_passed");
        assert_eq!(value["health_status"], true);
        assert_eq!(value["alert_data"]["data"]["essentials"]["severity"], "Sev3");
    }

    #[test]
    fn error_shape_and_status_code() {
        let outcome = HealOutcome::error("Missing required environment variables");
        let value: Value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "Missing required environment variables");
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(outcome.http_status(), 500);
    }
}
