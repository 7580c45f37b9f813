// ABOUTME: Monitoring alert payloads and criticality classification.
// ABOUTME: Unparseable alerts are treated as critical so remediation still happens.

use serde::Serialize;
use serde_json::{Map, Value};

pub const DEFAULT_CRITICAL_SEVERITIES: &[&str] = &["Sev0", "Sev1", "Critical"];
pub const DEFAULT_RULE_KEYWORDS: &[&str] = &["auto-heal", "downtime"];

const UNKNOWN_SEVERITY: &str = "Unknown";

/// An inbound alert, kept verbatim so it can be echoed in the outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AlertPayload(Value);

impl AlertPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Extract `data.essentials`. Absent severity / alertRule fall back to
    /// defaults; present but non-string values (null included) are parse errors.
    pub fn essentials(&self) -> Result<AlertEssentials, AlertParseError> {
        let root = self.0.as_object().ok_or(AlertParseError::NotAnObject)?;
        let data = object_field(root, "data")?;
        let essentials = object_field(data, "essentials")?;

        let severity = string_field(essentials, "severity")?.unwrap_or(UNKNOWN_SEVERITY);
        let alert_rule = string_field(essentials, "alertRule")?.unwrap_or_default();

        Ok(AlertEssentials {
            severity: severity.to_string(),
            alert_rule: alert_rule.to_string(),
        })
    }
}

/// The fields of an alert that drive classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEssentials {
    pub severity: String,
    pub alert_rule: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlertParseError {
    #[error("alert payload is not a JSON object")]
    NotAnObject,

    #[error("alert payload is missing '{0}'")]
    MissingField(&'static str),

    #[error("alert field '{0}' has the wrong type")]
    WrongType(&'static str),
}

fn object_field<'a>(
    parent: &'a Map<String, Value>,
    key: &'static str,
) -> Result<&'a Map<String, Value>, AlertParseError> {
    parent
        .get(key)
        .ok_or(AlertParseError::MissingField(key))?
        .as_object()
        .ok_or(AlertParseError::WrongType(key))
}

fn string_field<'a>(
    parent: &'a Map<String, Value>,
    key: &'static str,
) -> Result<Option<&'a str>, AlertParseError> {
    match parent.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(AlertParseError::WrongType(key)),
    }
}

/// Decides whether an alert warrants a restart on its own.
#[derive(Debug, Clone)]
pub struct AlertClassifier {
    critical_severities: Vec<String>,
    rule_keywords: Vec<String>,
}

impl AlertClassifier {
    pub fn new(critical_severities: Vec<String>, rule_keywords: Vec<String>) -> Self {
        Self {
            critical_severities,
            rule_keywords: rule_keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Critical if the severity is in the critical set or the rule name
    /// contains one of the keywords (case-insensitive). Payloads that cannot
    /// be parsed are critical.
    pub fn is_critical(&self, alert: &AlertPayload) -> bool {
        let essentials = match alert.essentials() {
            Ok(essentials) => essentials,
            Err(e) => {
                tracing::warn!("Failed to parse alert criticality: {}", e);
                return true;
            }
        };

        let severity_critical = self
            .critical_severities
            .iter()
            .any(|s| *s == essentials.severity);
        let rule = essentials.alert_rule.to_lowercase();
        let rule_critical = self.rule_keywords.iter().any(|k| rule.contains(k.as_str()));

        tracing::debug!(
            "Alert severity={} rule={:?} critical={}",
            essentials.severity,
            essentials.alert_rule,
            severity_critical || rule_critical
        );

        severity_critical || rule_critical
    }
}

impl Default for AlertClassifier {
    fn default() -> Self {
        Self::new(
            DEFAULT_CRITICAL_SEVERITIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            DEFAULT_RULE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn alert(severity: &str, rule: &str) -> AlertPayload {
        AlertPayload::new(json!({
            "schemaId": "azureMonitorCommonAlertSchema",
            "data": { "essentials": { "severity": severity, "alertRule": rule } }
        }))
    }

    #[test]
    fn critical_severities() {
        let classifier = AlertClassifier::default();
        assert!(classifier.is_critical(&alert("Sev0", "cpu")));
        assert!(classifier.is_critical(&alert("Sev1", "cpu")));
        assert!(classifier.is_critical(&alert("Critical", "cpu")));
        assert!(!classifier.is_critical(&alert("Sev2", "cpu")));
    }

    #[test]
    fn severity_match_is_case_sensitive() {
        assert!(!AlertClassifier::default().is_critical(&alert("sev0", "cpu")));
    }

    #[test]
    fn rule_keywords_ignore_case() {
        let classifier = AlertClassifier::default();
        assert!(classifier.is_critical(&alert("Sev3", "Container-AUTO-HEAL")));
        assert!(classifier.is_critical(&alert("Sev3", "nightly-Downtime-check")));
        assert!(!classifier.is_critical(&alert("Sev3", "high-latency")));
    }

    #[test]
    fn missing_essential_fields_use_defaults() {
        let payload = AlertPayload::new(json!({ "data": { "essentials": {} } }));
        let essentials = payload.essentials().unwrap();
        assert_eq!(essentials.severity, "Unknown");
        assert_eq!(essentials.alert_rule, "");
        assert!(!AlertClassifier::default().is_critical(&payload));
    }

    #[test]
    fn missing_data_is_critical() {
        let payload = AlertPayload::new(json!({ "schemaId": "x" }));
        assert_eq!(
            payload.essentials(),
            Err(AlertParseError::MissingField("data"))
        );
        assert!(AlertClassifier::default().is_critical(&payload));
    }

    #[test]
    fn wrong_types_are_critical() {
        let classifier = AlertClassifier::default();
        assert!(classifier.is_critical(&AlertPayload::new(json!([1, 2, 3]))));
        assert!(classifier.is_critical(&AlertPayload::new(json!({ "data": "oops" }))));
        assert!(classifier.is_critical(&AlertPayload::new(json!({
            "data": { "essentials": { "severity": 3 } }
        }))));
    }

    #[test]
    fn null_alert_rule_is_critical() {
        let payload = AlertPayload::new(json!({
            "data": { "essentials": { "severity": "Sev3", "alertRule": null } }
        }));
        assert_eq!(
            payload.essentials(),
            Err(AlertParseError::WrongType("alertRule"))
        );
        assert!(AlertClassifier::default().is_critical(&payload));
    }

    #[test]
    fn custom_keywords() {
        let classifier = AlertClassifier::new(vec!["P1".to_string()], vec!["OOM".to_string()]);
        assert!(classifier.is_critical(&alert("P1", "")));
        assert!(classifier.is_critical(&alert("Sev0", "pod-oom-killed")));
        assert!(!classifier.is_critical(&alert("Sev0", "downtime")));
    }
}
