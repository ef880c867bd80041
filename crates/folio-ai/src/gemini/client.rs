//! Gemini API client struct, request building, and response parsing.

use crate::{AiError, AiResponse, Message, Role, TokenUsage};

use super::config::GeminiConfig;

/// Gemini API client.
pub struct GeminiClient {
    pub(crate) config: GeminiConfig,
    pub(crate) http: reqwest::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client. Fails when the credential or model is blank or the
    /// HTTP client cannot be built.
    pub fn try_new(config: GeminiConfig) -> Result<Self, AiError> {
        if config.api_key.trim().is_empty() {
            return Err(AiError::Config("API key is empty".into()));
        }
        if config.model.trim().is_empty() {
            return Err(AiError::Config("model identifier is empty".into()));
        }
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(AiError::Config(format!(
                "invalid base URL: {}",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| AiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub(crate) fn api_url(&self, stream: bool) -> String {
        let method = if stream {
            "streamGenerateContent"
        } else {
            "generateContent"
        };
        format!(
            "{}/{}:{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            method
        )
    }

    /// Build the JSON request body for the Gemini API.
    pub(crate) fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        let mut contents = Vec::new();

        for msg in messages {
            let role = match msg.role {
                Role::User => "user",
                Role::Assistant => "model",
                Role::System => continue, // handled via systemInstruction
            };
            contents.push(serde_json::json!({
                "role": role,
                "parts": [{ "text": msg.content }]
            }));
        }

        let mut body = serde_json::json!({
            "contents": contents,
            "generationConfig": {
                "maxOutputTokens": self.config.max_tokens,
                "temperature": self.config.temperature,
            }
        });

        if let Some(system) = messages.iter().find(|m| m.role == Role::System) {
            body["systemInstruction"] = serde_json::json!({
                "parts": [{ "text": system.content }]
            });
        }

        body
    }

    /// Parse a complete (non-streaming) Gemini response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        if let Some(message) = api_error_message(&json) {
            return Err(AiError::ApiError(message));
        }
        if !json["candidates"].as_array().is_some_and(|c| !c.is_empty()) {
            return Err(AiError::ParseError("no candidates in response".to_string()));
        }

        Ok(AiResponse {
            content: candidate_text(&json),
            usage: usage_metadata(&json).unwrap_or_default(),
        })
    }
}

/// Text of all parts of all candidates, in order.
pub(crate) fn candidate_text(json: &serde_json::Value) -> String {
    let mut text = String::new();
    for candidate in json["candidates"].as_array().into_iter().flatten() {
        for part in candidate["content"]["parts"].as_array().into_iter().flatten() {
            if let Some(t) = part["text"].as_str() {
                text.push_str(t);
            }
        }
    }
    text
}

pub(crate) fn usage_metadata(json: &serde_json::Value) -> Option<TokenUsage> {
    let meta = json.get("usageMetadata")?;
    Some(TokenUsage {
        input_tokens: meta["promptTokenCount"].as_u64().unwrap_or(0),
        output_tokens: meta["candidatesTokenCount"].as_u64().unwrap_or(0),
    })
}

/// `{"error": {"code": 400, "message": "..."}}` payloads.
pub(crate) fn api_error_message(json: &serde_json::Value) -> Option<String> {
    let error = json.get("error")?;
    let message = error["message"].as_str().unwrap_or("unknown error");
    Some(match error["code"].as_u64() {
        Some(code) => format!("{code}: {message}"),
        None => message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::try_new(GeminiConfig::new("test-key").with_max_tokens(512)).unwrap()
    }

    #[test]
    fn blank_key_or_model_is_rejected() {
        let err = GeminiClient::try_new(GeminiConfig::new("  ")).unwrap_err();
        assert!(matches!(err, AiError::Config(_)));

        let err = GeminiClient::try_new(GeminiConfig::new("key").with_model("")).unwrap_err();
        assert!(err.to_string().contains("model identifier is empty"));

        let err = GeminiClient::try_new(GeminiConfig::new("key").with_base_url("ftp://x"))
            .unwrap_err();
        assert!(err.to_string().contains("invalid base URL"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", GeminiConfig::new("super-secret"));
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn api_url_uses_model_and_method() {
        let client = client();
        assert_eq!(
            client.api_url(true),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:streamGenerateContent"
        );
        assert!(client.api_url(false).ends_with(":generateContent"));
    }

    #[test]
    fn request_body_maps_roles_and_system_instruction() {
        let body = client().build_request_body(&[
            Message::system("Only use the facts."),
            Message::user("Hi"),
            Message::assistant("Hello!"),
            Message::user("Which certifications?"),
        ]);

        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["parts"][0]["text"], "Which certifications?");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "Only use the facts."
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 512);
    }

    #[test]
    fn request_body_without_system_prompt() {
        let body = client().build_request_body(&[Message::user("Hi")]);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn parse_response_concatenates_parts() {
        let json = serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "AWS" }, { "text": " Certified" }] }
            }],
            "usageMetadata": { "promptTokenCount": 900, "candidatesTokenCount": 4 }
        });
        let response = client().parse_response(json).unwrap();
        assert_eq!(response.content, "AWS Certified");
        assert_eq!(response.usage.input_tokens, 900);
        assert_eq!(response.usage.output_tokens, 4);
    }

    #[test]
    fn parse_response_without_candidates_fails() {
        let err = client()
            .parse_response(serde_json::json!({ "candidates": [] }))
            .unwrap_err();
        assert!(matches!(err, AiError::ParseError(_)));
    }

    #[test]
    fn parse_response_surfaces_api_error() {
        let json = serde_json::json!({
            "error": { "code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED" }
        });
        let err = client().parse_response(json).unwrap_err();
        assert_eq!(err.to_string(), "API error: 403: API key not valid");
    }
}
