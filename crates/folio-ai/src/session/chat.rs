//! Streaming send for Session.

use std::sync::PoisonError;

use tracing::{debug, info, warn};

use crate::prompt::APOLOGY_MESSAGE;
use crate::{AiError, Message};

use super::manager::{ProviderHandle, Session};
use super::types::{BusyGuard, IgnoreReason, SendOutcome, SessionError};

impl Session {
    /// Send a visitor message and stream the reply into the transcript.
    ///
    /// Ignored when the session is degraded, a reply is already streaming,
    /// or `text` is blank. Otherwise the user message is appended and
    /// `is_loading` set before the first await; each fragment rewrites the
    /// trailing assistant message with the text received so far.
    pub async fn send_message(&self, text: impl Into<String>) -> SendOutcome {
        let text = text.into();

        let Some(provider) = self.provider.as_ref() else {
            debug!(session = %self.id.short(), "ignoring message: session degraded");
            return SendOutcome::Ignored(IgnoreReason::Degraded);
        };
        if text.trim().is_empty() {
            return SendOutcome::Ignored(IgnoreReason::EmptyInput);
        }
        let Some(_guard) = BusyGuard::acquire(&self.busy, &self.transcript) else {
            debug!(session = %self.id.short(), "ignoring message: reply in flight");
            return SendOutcome::Ignored(IgnoreReason::Busy);
        };

        self.transcript.send_modify(|t| {
            t.messages.push(Message::user(text.clone()));
            t.is_loading = true;
        });

        let request = self.build_messages(provider, &text);
        let mut reply = String::new();
        let mut started = false;

        let result = {
            let mut on_chunk = |fragment: &str| {
                reply.push_str(fragment);
                let first = !started;
                started = true;
                self.transcript.send_modify(|t| {
                    if first {
                        t.messages.push(Message::assistant(String::new()));
                    }
                    if let Some(last) = t.messages.last_mut() {
                        last.content.clone_from(&reply);
                    }
                });
            };

            let call = provider.client.send_message_streaming(&request, &mut on_chunk);
            match self.response_timeout {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .unwrap_or(Err(AiError::Timeout)),
                None => call.await,
            }
        };

        match result {
            Ok(response) => {
                self.tracker
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .record(provider.client.model(), &response.usage);
                provider
                    .history
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .extend([Message::user(text), Message::assistant(reply.clone())]);

                info!(
                    session = %self.id.short(),
                    chars = reply.len(),
                    output_tokens = response.usage.output_tokens,
                    "reply complete"
                );
                SendOutcome::Completed { reply }
            }
            Err(e) => {
                warn!(session = %self.id.short(), partial = started, "Failed to send message: {e}");
                // `is_loading` is cleared by the guard, after the slot is free.
                self.transcript
                    .send_modify(|t| t.messages.push(Message::assistant(APOLOGY_MESSAGE)));
                SendOutcome::Failed(SessionError::Streaming(e))
            }
        }
    }

    /// System prompt, completed exchanges, then the new user message.
    fn build_messages(&self, provider: &ProviderHandle, text: &str) -> Vec<Message> {
        let history = provider
            .history
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut msgs = Vec::with_capacity(history.len() + 2);
        msgs.push(Message::system(self.system_prompt.clone()));
        msgs.extend(history.iter().cloned());
        msgs.push(Message::user(text));
        msgs
    }
}
