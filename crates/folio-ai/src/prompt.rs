//! System prompt and fixed assistant texts.

use folio_content::Resume;

/// Shown when no API credential is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "I'm sorry, but the AI assistant is not configured correctly. Please contact the site owner.";

/// Shown when the provider handle could not be created.
pub const CONNECTION_TROUBLE_MESSAGE: &str =
    "Sorry, I'm having trouble connecting right now. Please try again later.";

/// Appended when a streamed reply fails.
pub const APOLOGY_MESSAGE: &str = "Oops! Something went wrong. Please try again.";

/// Build the instruction that confines the assistant to the resume facts.
/// The whole record is embedded as JSON.
pub fn build_system_prompt(resume: &Resume) -> Result<String, serde_json::Error> {
    let facts = serde_json::to_string(resume)?;
    Ok(format!(
        "You are an AI assistant for {name}'s portfolio website. Your goal is to answer \
         questions from visitors and potential employers based *only* on the provided resume \
         information. Be friendly, professional, and concise. If a question cannot be answered \
         from the provided context, politely state that you don't have that information. \
         Do not invent any details. Here is the resume information in JSON format: {facts}",
        name = resume.main.name,
    ))
}

/// Greeting that opens a healthy session.
pub fn default_greeting(resume: &Resume) -> String {
    format!(
        "Hello! I'm {}'s AI assistant. Feel free to ask me anything about {}'s skills and experience.",
        resume.first_name(),
        resume.first_name(),
    )
}
