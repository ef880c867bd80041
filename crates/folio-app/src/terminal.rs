//! Line-based terminal front-end for a chat `Session`.
//!
//! Input is read only while no reply is streaming, so the prompt stays
//! disabled until `is_loading` clears.

use std::io::{self, Write};

use folio_ai::{Role, SendOutcome, Session, Transcript};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const PROMPT: &str = "you> ";

/// Prints assistant text as it grows, from a transcript index onwards.
/// User messages are skipped; they were already typed by the visitor.
pub struct Renderer {
    index: usize,
    printed: usize,
}

impl Renderer {
    pub fn starting_at(index: usize) -> Self {
        Self { index, printed: 0 }
    }

    /// Write whatever text appeared since the last call.
    pub fn render<W: Write>(&mut self, transcript: &Transcript, out: &mut W) -> io::Result<()> {
        while let Some(message) = transcript.messages.get(self.index) {
            let is_last = self.index + 1 == transcript.messages.len();

            if message.role == Role::Assistant {
                // Fragments only ever extend the content.
                if let Some(new) = message.content.get(self.printed..) {
                    out.write_all(new.as_bytes())?;
                    self.printed = message.content.len();
                }
            }

            if is_last {
                break;
            }
            if message.role == Role::Assistant && self.printed > 0 {
                writeln!(out)?;
            }
            self.index += 1;
            self.printed = 0;
        }
        out.flush()
    }

    /// Terminate the line of the last rendered message.
    pub fn finish<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if self.printed > 0 {
            writeln!(out)?;
            self.printed = 0;
        }
        self.index += 1;
        out.flush()
    }
}

/// Send `text` and render the reply while it streams.
pub async fn stream_reply<W: Write>(
    session: &Session,
    text: &str,
    out: &mut W,
) -> io::Result<SendOutcome> {
    let mut rx = session.subscribe();
    let mut renderer = Renderer::starting_at(rx.borrow_and_update().messages.len());

    let send = session.send_message(text);
    tokio::pin!(send);

    let outcome = loop {
        tokio::select! {
            outcome = &mut send => break outcome,
            changed = rx.changed() => {
                if changed.is_err() {
                    break send.as_mut().await;
                }
                let snapshot = rx.borrow_and_update().clone();
                renderer.render(&snapshot, out)?;
            }
        }
    };

    renderer.render(&session.transcript(), out)?;
    renderer.finish(out)?;
    Ok(outcome)
}

/// Interactive loop: greeting first, then one exchange per input line
/// until EOF or `/quit`.
pub async fn run_chat(session: &Session) -> io::Result<()> {
    let mut stdout = io::stdout();

    let mut greeting = Renderer::starting_at(0);
    greeting.render(&session.transcript(), &mut stdout)?;
    greeting.finish(&mut stdout)?;

    if let Some(reason) = session.degraded_reason() {
        warn!("Chat unavailable: {reason}");
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(stdout)?;
            break;
        };
        let line = line.trim();
        if matches!(line, "/quit" | "/exit") {
            break;
        }
        if line.is_empty() {
            continue;
        }

        if let SendOutcome::Failed(e) = stream_reply(session, line, &mut stdout).await? {
            warn!("Reply failed: {e}");
        }
    }

    info!(
        "Session {} closed: {} requests, {} tokens",
        session.id().short(),
        session.request_count(),
        session.usage().total_tokens()
    );
    if let (Some(model), Some(usage)) = (session.model(), session.model_usage()) {
        info!(
            "{model}: {} input / {} output tokens",
            usage.input_tokens, usage.output_tokens
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use folio_ai::{AiClient, AiError, AiResponse, Message, SessionOptions, TokenUsage};
    use folio_content::Resume;

    struct FixedClient {
        fragments: Vec<&'static str>,
        fail: bool,
    }

    #[async_trait]
    impl AiClient for FixedClient {
        fn model(&self) -> &str {
            "fixed"
        }

        async fn send_message_streaming(
            &self,
            _messages: &[Message],
            on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
        ) -> Result<AiResponse, AiError> {
            for fragment in &self.fragments {
                tokio::task::yield_now().await;
                on_chunk(fragment);
            }
            if self.fail {
                return Err(AiError::NetworkError("reset".into()));
            }
            Ok(AiResponse {
                content: self.fragments.concat(),
                usage: TokenUsage::default(),
            })
        }
    }

    fn session(fragments: Vec<&'static str>, fail: bool) -> Session {
        Session::with_client(
            Box::new(FixedClient { fragments, fail }),
            &Resume::builtin().unwrap(),
            SessionOptions::new("Hi there."),
        )
    }

    fn transcript(messages: Vec<Message>) -> Transcript {
        Transcript {
            messages,
            is_loading: false,
        }
    }

    #[test]
    fn renders_growth_incrementally() {
        let mut out = Vec::new();
        let mut renderer = Renderer::starting_at(0);

        renderer
            .render(&transcript(vec![Message::assistant("Hel")]), &mut out)
            .unwrap();
        renderer
            .render(&transcript(vec![Message::assistant("Hello")]), &mut out)
            .unwrap();
        renderer.finish(&mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Hello\n");
    }

    #[test]
    fn skips_user_messages() {
        let mut out = Vec::new();
        let mut renderer = Renderer::starting_at(1);
        let t = transcript(vec![
            Message::assistant("greeting"),
            Message::user("question"),
            Message::assistant("answer"),
        ]);
        renderer.render(&t, &mut out).unwrap();
        renderer.finish(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "answer\n");
    }

    #[tokio::test]
    async fn streams_reply_to_writer() {
        let session = session(vec!["Post", "greSQL and ", "Kafka."], false);
        let mut out = Vec::new();

        let outcome = stream_reply(&session, "What do you run?", &mut out)
            .await
            .unwrap();

        assert!(matches!(outcome, SendOutcome::Completed { .. }));
        assert_eq!(String::from_utf8(out).unwrap(), "PostgreSQL and Kafka.\n");
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn failure_prints_partial_then_apology() {
        let session = session(vec!["Part"], true);
        let mut out = Vec::new();

        let outcome = stream_reply(&session, "Tell me more", &mut out).await.unwrap();

        assert!(matches!(outcome, SendOutcome::Failed(_)));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Part\n{}\n", folio_ai::prompt::APOLOGY_MESSAGE)
        );
    }

    #[tokio::test]
    async fn blank_input_prints_nothing() {
        let session = session(vec!["x"], false);
        let mut out = Vec::new();
        let outcome = stream_reply(&session, "   ", &mut out).await.unwrap();
        assert!(outcome.is_ignored());
        assert!(out.is_empty());
    }
}
