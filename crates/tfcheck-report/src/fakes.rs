//! In-memory fake for the host capability (testing only)
//!
//! Provides `MemoryHost`, which satisfies the [`CiHost`] contract while
//! recording every interaction for assertions, without touching the
//! network or the runner environment.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;
use crate::host::CiHost;

/// A single recorded host interaction.
///
/// All interactions land in one ordered log so tests can assert their
/// relative order (e.g. that a comment is posted before the step is
/// marked failed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Info(String),
    Failed(String),
    Output { key: String, value: String },
    Comment(String),
}

/// In-memory host that records info lines, failure messages, step outputs,
/// and posted comment bodies in invocation order.
#[derive(Debug, Default)]
pub struct MemoryHost {
    events: Mutex<Vec<HostEvent>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// All interactions recorded so far, in order.
    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Info lines emitted so far.
    pub fn infos(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Info(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Fatal failure messages recorded so far.
    pub fn failures(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Failed(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Step outputs set so far, in order.
    pub fn outputs(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Output { key, value } => Some((key, value)),
                _ => None,
            })
            .collect()
    }

    /// Comment bodies posted so far, in order.
    pub fn comments(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                HostEvent::Comment(body) => Some(body),
                _ => None,
            })
            .collect()
    }

    /// Look up a step output by key.
    pub fn output(&self, key: &str) -> Option<String> {
        self.outputs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    fn record(&self, event: HostEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl CiHost for MemoryHost {
    fn info(&self, message: &str) {
        self.record(HostEvent::Info(message.to_string()));
    }

    fn set_failed(&self, message: &str) {
        self.record(HostEvent::Failed(message.to_string()));
    }

    fn failed(&self) -> bool {
        self.events()
            .iter()
            .any(|event| matches!(event, HostEvent::Failed(_)))
    }

    fn set_output(&self, key: &str, value: &str) -> Result<()> {
        self.record(HostEvent::Output {
            key: key.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn post_comment(&self, body: &str) -> Result<()> {
        self.record(HostEvent::Comment(body.to_string()));
        Ok(())
    }
}
