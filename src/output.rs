// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Renders heal outcomes in normal, quiet (status only) and JSON modes.

use serde::Serialize;
use std::time::Instant;

use crate::heal::{Action, HealOutcome, OutcomeStatus};

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Status word only, for cron mail and CI logs
    Quiet,
    /// One JSON document per outcome
    Json,
}

/// Handles CLI output based on the configured mode.
pub struct Output {
    mode: OutputMode,
    start_time: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            start_time: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("Error: {message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    duration_secs: self.start_time.map(|_| self.elapsed_secs()),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print the outcome of a heal run to stdout.
    pub fn outcome(&self, outcome: &HealOutcome) {
        if let Some(rendered) = self.render(outcome) {
            println!("{rendered}");
        }
    }

    /// Render an outcome for the current mode.
    pub fn render(&self, outcome: &HealOutcome) -> Option<String> {
        match self.mode {
            OutputMode::Normal => Some(self.render_normal(outcome)),
            OutputMode::Quiet => Some(status_word(outcome.status).to_string()),
            OutputMode::Json => match outcome.to_json() {
                Ok(json) => Some(json),
                Err(e) => {
                    tracing::error!("Failed to serialize outcome: {}", e);
                    None
                }
            },
        }
    }

    fn render_normal(&self, outcome: &HealOutcome) -> String {
        let target = match (&outcome.resource_group, &outcome.container_group) {
            (Some(rg), Some(name)) => format!("{rg}/{name}"),
            _ => "container group".to_string(),
        };

        let mut line = match (outcome.status, outcome.action) {
            (OutcomeStatus::Error, _) | (_, Action::Aborted) => format!(
                "✗ Auto-heal aborted: {}",
                outcome.error.as_deref().unwrap_or("unknown error")
            ),
            (_, Action::HealthCheckPassed) => {
                format!("✓ {target} is healthy, no action needed")
            }
            (_, Action::ContainerRestarted) => match outcome.post_restart_health {
                Some(true) => format!("✓ Restarted {target}, recovery verified"),
                Some(false) => format!("⚠ Restarted {target}, recovery not verified"),
                None => format!("✓ Restarted {target}"),
            },
        };

        let elapsed = self.elapsed_secs();
        if elapsed > 0.0 {
            line.push_str(&format!(" ({:.1}s)", elapsed));
        }
        line
    }
}

fn status_word(status: OutcomeStatus) -> &'static str {
    match status {
        OutcomeStatus::Success => "success",
        OutcomeStatus::NoActionNeeded => "no_action_needed",
        OutcomeStatus::Error => "error",
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
