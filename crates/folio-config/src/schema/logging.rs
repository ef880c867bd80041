//! Logging configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing_subscriber` filter directive for the workspace crates.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "folio=debug",
            LogLevel::Info => "folio=info",
            LogLevel::Warn => "folio=warn",
            LogLevel::Error => "folio=error",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_target_folio() {
        assert_eq!(LogLevel::default().directive(), "folio=info");
        assert_eq!(LogLevel::Debug.directive(), "folio=debug");
    }

    #[test]
    fn level_deserializes_lowercase() {
        let config: LoggingConfig = toml::from_str("level = \"warn\"").unwrap();
        assert_eq!(config.level, LogLevel::Warn);
    }
}
