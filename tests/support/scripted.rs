// ABOUTME: Scripted platform and health check doubles.
// ABOUTME: Replay queued answers and record every call for assertions.

use async_trait::async_trait;
use medic::health::HealthCheck;
use medic::platform::{ContainerPlatform, PlatformError};
use medic::types::ContainerState;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
enum StateReply {
    State(String),
    Fail,
}

#[derive(Debug)]
struct PlatformScript {
    states: VecDeque<StateReply>,
    fallback: StateReply,
    restart_fails: bool,
    state_calls: usize,
    restart_timeouts: Vec<Option<Duration>>,
}

/// Platform double. Clones share the same script and call log.
#[derive(Debug, Clone)]
pub struct ScriptedPlatform {
    script: Arc<Mutex<PlatformScript>>,
}

impl ScriptedPlatform {
    /// Every state query answers `fallback` unless an answer is queued.
    pub fn new(fallback: &str) -> Self {
        Self {
            script: Arc::new(Mutex::new(PlatformScript {
                states: VecDeque::new(),
                fallback: StateReply::State(fallback.to_string()),
                restart_fails: false,
                state_calls: 0,
                restart_timeouts: Vec::new(),
            })),
        }
    }

    pub fn then_state(self, state: &str) -> Self {
        self.script
            .lock()
            .states
            .push_back(StateReply::State(state.to_string()));
        self
    }

    pub fn then_state_error(self) -> Self {
        self.script.lock().states.push_back(StateReply::Fail);
        self
    }

    pub fn failing_state(self) -> Self {
        self.script.lock().fallback = StateReply::Fail;
        self
    }

    pub fn failing_restart(self) -> Self {
        self.script.lock().restart_fails = true;
        self
    }

    pub fn state_calls(&self) -> usize {
        self.script.lock().state_calls
    }

    pub fn restart_calls(&self) -> usize {
        self.script.lock().restart_timeouts.len()
    }

    pub fn restart_timeouts(&self) -> Vec<Option<Duration>> {
        self.script.lock().restart_timeouts.clone()
    }
}

#[async_trait]
impl ContainerPlatform for ScriptedPlatform {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn state(&self) -> Result<ContainerState, PlatformError> {
        let reply = {
            let mut script = self.script.lock();
            script.state_calls += 1;
            let fallback = script.fallback.clone();
            script.states.pop_front().unwrap_or(fallback)
        };
        match reply {
            StateReply::State(state) => Ok(ContainerState::new(state)),
            StateReply::Fail => Err(PlatformError::Api {
                message: "scripted state failure".to_string(),
            }),
        }
    }

    async fn restart(&self, timeout: Option<Duration>) -> Result<(), PlatformError> {
        let fails = {
            let mut script = self.script.lock();
            script.restart_timeouts.push(timeout);
            script.restart_fails
        };
        if fails {
            return Err(PlatformError::CommandFailed {
                program: "az".to_string(),
                exit_code: Some(1),
                stderr: "ERROR: (AuthorizationFailed)".to_string(),
            });
        }
        Ok(())
    }
}

/// Health check double answering queued results, then `fallback`.
#[derive(Debug, Clone)]
pub struct ScriptedProbe {
    answers: Arc<Mutex<VecDeque<bool>>>,
    fallback: bool,
    urls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProbe {
    pub fn new(fallback: bool) -> Self {
        Self {
            answers: Arc::new(Mutex::new(VecDeque::new())),
            fallback,
            urls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn then(self, healthy: bool) -> Self {
        self.answers.lock().push_back(healthy);
        self
    }

    pub fn calls(&self) -> usize {
        self.urls.lock().len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().clone()
    }
}

#[async_trait]
impl HealthCheck for ScriptedProbe {
    async fn check(&self, url: &str) -> bool {
        self.urls.lock().push(url.to_string());
        self.answers.lock().pop_front().unwrap_or(self.fallback)
    }
}
