//! Session types and the single-flight guard.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;

use crate::{AiError, Message};

/// What the UI renders: the ordered message list and the loading flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub messages: Vec<Message>,
    pub is_loading: bool,
}

impl Transcript {
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Sending,
    /// Creation failed; the session never accepts messages.
    Degraded,
}

/// Why a session could not serve, or a request failed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("assistant is not configured: {0}")]
    Configuration(String),
    #[error("failed to open provider: {0}")]
    Initialization(String),
    #[error("streaming failed: {0}")]
    Streaming(#[from] AiError),
}

/// Why `send_message` did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Degraded,
    Busy,
    EmptyInput,
}

/// Result of one `send_message` call. Provider failures are reported here
/// and in the transcript, never as `Err`.
#[derive(Debug)]
pub enum SendOutcome {
    Completed { reply: String },
    Failed(SessionError),
    Ignored(IgnoreReason),
}

impl SendOutcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, SendOutcome::Ignored(_))
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub greeting: String,
    /// Upper bound on one streamed reply; `None` waits forever.
    pub response_timeout: Option<Duration>,
}

impl SessionOptions {
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            greeting: greeting.into(),
            response_timeout: None,
        }
    }

    pub fn with_response_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.response_timeout = timeout;
        self
    }
}

/// Holds the session's admission slot. Dropping it clears `is_loading` and
/// releases the slot, so a cancelled request cannot wedge the session.
pub(crate) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
    transcript: &'a watch::Sender<Transcript>,
}

impl<'a> BusyGuard<'a> {
    /// Take the slot, or `None` if a request is already in flight.
    pub(crate) fn acquire(
        flag: &'a AtomicBool,
        transcript: &'a watch::Sender<Transcript>,
    ) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()?;
        Some(Self { flag, transcript })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        // Release the slot before watchers can observe `is_loading == false`.
        self.transcript.send_if_modified(|t| {
            self.flag.store(false, Ordering::Release);
            std::mem::replace(&mut t.is_loading, false)
        });
    }
}
