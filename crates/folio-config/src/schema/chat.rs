//! Chat assistant configuration.

use serde::{Deserialize, Serialize};

/// Settings for the hosted chat provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Provider model identifier.
    pub model: String,
    /// Environment variable holding the API credential.
    pub api_key_env: String,
    /// Valid range: 1-65536.
    pub max_tokens: u32,
    /// Valid range: 0.0-2.0.
    pub temperature: f64,
    /// Per-request limit in seconds; 0 disables it (valid range: 0-600).
    pub response_timeout_secs: u32,
    /// Replaces the default greeting shown when a session opens.
    pub greeting: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            api_key_env: "GEMINI_API_KEY".into(),
            max_tokens: 2048,
            temperature: 0.7,
            response_timeout_secs: 120,
            greeting: None,
        }
    }
}

impl ChatConfig {
    pub fn response_timeout(&self) -> Option<std::time::Duration> {
        match self.response_timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(u64::from(secs))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_disables() {
        let config = ChatConfig {
            response_timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.response_timeout().is_none());
    }

    #[test]
    fn default_timeout_is_two_minutes() {
        let timeout = ChatConfig::default().response_timeout().unwrap();
        assert_eq!(timeout.as_secs(), 120);
    }
}
