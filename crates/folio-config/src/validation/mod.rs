//! Configuration validation.
//!
//! Each section has its own check; this orchestrator calls them all and
//! collects errors into a single `ConfigError`.

mod helpers;


use crate::schema::FolioConfig;
use folio_common::ConfigError;

use helpers::{validate_non_empty, validate_range, validate_range_f64};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &FolioConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_chat(&mut errors, config);
    validate_site(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_chat(errors: &mut Vec<String>, config: &FolioConfig) {
    validate_non_empty(errors, "chat.model", &config.chat.model);
    validate_non_empty(errors, "chat.api_key_env", &config.chat.api_key_env);
    validate_range(errors, "chat.max_tokens", config.chat.max_tokens, 1, 65536);
    validate_range_f64(errors, "chat.temperature", config.chat.temperature, 0.0, 2.0);
    validate_range(
        errors,
        "chat.response_timeout_secs",
        config.chat.response_timeout_secs,
        0,
        600,
    );
}

fn validate_site(errors: &mut Vec<String>, config: &FolioConfig) {
    let url = &config.site.site_url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        errors.push(format!("site.site_url = {url:?} must be an absolute http(s) URL"));
    }
    validate_non_empty(errors, "site.blog_title", &config.site.blog_title);
}
