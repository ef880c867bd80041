//! AiClient trait implementation for GeminiClient (send_message + streaming).

use async_trait::async_trait;
use tracing::debug;

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiError, AiResponse, Message, TokenUsage};

use super::client::{api_error_message, candidate_text, usage_metadata, GeminiClient};

impl GeminiClient {
    async fn post(&self, url: &str, messages: &[Message]) -> Result<reqwest::Response, AiError> {
        let body = self.build_request_body(messages);

        let response = self
            .http
            .post(url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        Ok(response)
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_message(&self, messages: &[Message]) -> Result<AiResponse, AiError> {
        debug!(model = %self.config.model, "Gemini API request");

        let response = self.post(&self.api_url(false), messages).await?;
        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<AiResponse, AiError> {
        let url = format!("{}?alt=sse", self.api_url(true));

        debug!(model = %self.config.model, turns = messages.len(), "Gemini API streaming request");

        let response = self.post(&url, messages).await?;

        let mut full_content = String::new();
        let mut usage = TokenUsage::default();

        parse_sse_stream(response, |event: SseEvent| {
            let chunk = parse_stream_event(&event.data)?;
            if let Some(u) = chunk.usage {
                usage = u;
            }
            if !chunk.text.is_empty() {
                full_content.push_str(&chunk.text);
                on_chunk(&chunk.text);
            }
            Ok(())
        })
        .await?;

        debug!(
            model = %self.config.model,
            chars = full_content.len(),
            output_tokens = usage.output_tokens,
            "Gemini stream finished"
        );

        Ok(AiResponse {
            content: full_content,
            usage,
        })
    }
}

/// One decoded `streamGenerateContent` event.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct StreamChunk {
    pub text: String,
    pub usage: Option<TokenUsage>,
}

pub(crate) fn parse_stream_event(data: &str) -> Result<StreamChunk, AiError> {
    let json: serde_json::Value = serde_json::from_str(data)
        .map_err(|e| AiError::ParseError(format!("malformed stream event: {e}")))?;

    if let Some(message) = api_error_message(&json) {
        return Err(AiError::ApiError(message));
    }

    Ok(StreamChunk {
        text: candidate_text(&json),
        usage: usage_metadata(&json),
    })
}

fn map_transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::NetworkError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_event_text_and_usage() {
        let chunk = parse_stream_event(
            r#"{"candidates":[{"content":{"parts":[{"text":" Solutions Architect"}],"role":"model"}}],"usageMetadata":{"promptTokenCount":1200,"candidatesTokenCount":9}}"#,
        )
        .unwrap();
        assert_eq!(chunk.text, " Solutions Architect");
        assert_eq!(
            chunk.usage,
            Some(TokenUsage {
                input_tokens: 1200,
                output_tokens: 9,
            })
        );
    }

    #[test]
    fn stream_event_without_text() {
        let chunk =
            parse_stream_event(r#"{"candidates":[{"finishReason":"STOP","content":{"parts":[]}}]}"#)
                .unwrap();
        assert!(chunk.text.is_empty());
        assert!(chunk.usage.is_none());
    }

    #[test]
    fn malformed_stream_event_is_parse_error() {
        let err = parse_stream_event("{\"candidates\": [").unwrap_err();
        assert!(matches!(err, AiError::ParseError(_)));
    }

    #[test]
    fn error_payload_in_stream_is_api_error() {
        let err = parse_stream_event(r#"{"error":{"code":503,"message":"The model is overloaded."}}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: 503: The model is overloaded.");
    }
}
