//! Session construction and read access.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use folio_common::SessionId;
use folio_config::ChatConfig;
use folio_content::Resume;
use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::gemini::{GeminiClient, GeminiConfig};
use crate::prompt::{
    build_system_prompt, default_greeting, CONNECTION_TROUBLE_MESSAGE, NOT_CONFIGURED_MESSAGE,
};
use crate::token_tracker::TokenTracker;
use crate::{AiClient, Message, TokenUsage};

use super::types::{SessionError, SessionOptions, SessionState, Transcript};

/// Environment variable read when the configured one is unset.
const FALLBACK_API_KEY_ENV: &str = "API_KEY";

/// First non-blank value of `primary`, then of `API_KEY`.
pub(super) fn resolve_api_key(
    primary: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    [primary, FALLBACK_API_KEY_ENV]
        .into_iter()
        .filter_map(&lookup)
        .find(|key| !key.trim().is_empty())
}

/// The live provider connection, exclusively owned by one session.
pub(super) struct ProviderHandle {
    pub(super) client: Box<dyn AiClient>,
    /// Completed exchanges sent back as context. Greetings, apologies and
    /// failed turns are not part of it.
    pub(super) history: Mutex<Vec<Message>>,
}

/// A conversation with the portfolio assistant.
pub struct Session {
    pub(super) id: SessionId,
    pub(super) system_prompt: String,
    pub(super) provider: Option<ProviderHandle>,
    pub(super) degraded: Option<SessionError>,
    pub(super) transcript: watch::Sender<Transcript>,
    pub(super) busy: AtomicBool,
    pub(super) response_timeout: Option<Duration>,
    pub(super) tracker: Mutex<TokenTracker>,
}

impl Session {
    /// Open a session with the credential from the environment variable
    /// named in `config` (falling back to `API_KEY`).
    pub fn from_env(config: &ChatConfig, resume: &Resume) -> Self {
        let api_key = resolve_api_key(&config.api_key_env, |name| std::env::var(name).ok());
        Self::create(config, resume, api_key)
    }

    /// Open a Gemini-backed session. Never fails: a missing credential or a
    /// provider that cannot be set up yields a degraded session whose only
    /// message explains the problem.
    pub fn create(config: &ChatConfig, resume: &Resume, api_key: Option<String>) -> Self {
        let options = SessionOptions::new(
            config
                .greeting
                .clone()
                .unwrap_or_else(|| default_greeting(resume)),
        )
        .with_response_timeout(config.response_timeout());

        let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) else {
            error!(env = %config.api_key_env, "API key environment variable not set");
            return Self::degraded(
                SessionError::Configuration(format!("{} is not set", config.api_key_env)),
                build_system_prompt(resume).unwrap_or_default(),
            );
        };

        match GeminiClient::try_new(GeminiConfig::from_chat_config(api_key, config)) {
            Ok(client) => Self::with_client(Box::new(client), resume, options),
            Err(e) => {
                error!("Failed to initialize Gemini chat: {e}");
                Self::degraded(
                    SessionError::Initialization(e.to_string()),
                    build_system_prompt(resume).unwrap_or_default(),
                )
            }
        }
    }

    /// Open a session on an already constructed provider.
    pub fn with_client(client: Box<dyn AiClient>, resume: &Resume, options: SessionOptions) -> Self {
        let system_prompt = match build_system_prompt(resume) {
            Ok(prompt) => prompt,
            Err(e) => {
                error!("Failed to serialize resume for system prompt: {e}");
                return Self::degraded(SessionError::Initialization(e.to_string()), String::new());
            }
        };

        let id = SessionId::new();
        info!(session = %id.short(), model = %client.model(), "chat session ready");

        Self {
            id,
            system_prompt,
            provider: Some(ProviderHandle {
                client,
                history: Mutex::new(Vec::new()),
            }),
            degraded: None,
            transcript: watch::Sender::new(Transcript {
                messages: vec![Message::assistant(options.greeting)],
                is_loading: false,
            }),
            busy: AtomicBool::new(false),
            response_timeout: options.response_timeout,
            tracker: Mutex::new(TokenTracker::new()),
        }
    }

    fn degraded(reason: SessionError, system_prompt: String) -> Self {
        let notice = match reason {
            SessionError::Configuration(_) => NOT_CONFIGURED_MESSAGE,
            SessionError::Initialization(_) | SessionError::Streaming(_) => {
                CONNECTION_TROUBLE_MESSAGE
            }
        };
        let id = SessionId::new();
        warn!(session = %id.short(), "chat session degraded: {reason}");

        Self {
            id,
            system_prompt,
            provider: None,
            degraded: Some(reason),
            transcript: watch::Sender::new(Transcript {
                messages: vec![Message::assistant(notice)],
                is_loading: false,
            }),
            busy: AtomicBool::new(false),
            response_timeout: None,
            tracker: Mutex::new(TokenTracker::new()),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn state(&self) -> SessionState {
        if self.provider.is_none() {
            SessionState::Degraded
        } else if self.busy.load(Ordering::Acquire) {
            SessionState::Sending
        } else {
            SessionState::Idle
        }
    }

    /// Why the session is degraded, if it is.
    pub fn degraded_reason(&self) -> Option<&SessionError> {
        self.degraded.as_ref()
    }

    /// Snapshot of the transcript.
    pub fn transcript(&self) -> Transcript {
        self.transcript.borrow().clone()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.transcript.borrow().messages.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.transcript.borrow().is_loading
    }

    /// Receiver notified on every transcript change, including each
    /// streamed fragment.
    pub fn subscribe(&self) -> watch::Receiver<Transcript> {
        self.transcript.subscribe()
    }

    /// Cumulative token usage reported by the provider.
    pub fn usage(&self) -> TokenUsage {
        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .total()
    }

    /// Provider model id, `None` when degraded.
    pub fn model(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.client.model())
    }

    /// Usage attributed to the session's model.
    pub fn model_usage(&self) -> Option<TokenUsage> {
        let model = self.model()?;
        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .for_model(model)
    }

    /// Number of completed provider requests.
    pub fn request_count(&self) -> u64 {
        self.tracker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .call_count()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("messages", &self.transcript.borrow().messages.len())
            .finish_non_exhaustive()
    }
}
