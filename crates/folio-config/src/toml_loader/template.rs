//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Folio Configuration
# Only override what you want to change -- missing fields use defaults.

[chat]
# model = "gemini-2.5-flash"
# api_key_env = "GEMINI_API_KEY"   # API_KEY is also accepted
# max_tokens = 2048                # 1-65536
# temperature = 0.7                # 0.0-2.0
# response_timeout_secs = 120      # 0-600, 0 disables
# greeting = "Hello! Ask me anything about my experience."

[site]
# name = "Shahid Moosa"
# site_url = "https://shahidster.tech"
# blog_title = "Shahid Moosa - Distributed Systems Engineering"
# language = "en-us"

[content]
# resume_path = "/path/to/resume.json"

[logging]
# level = "info"                   # debug, info, warn, error
"##
}
