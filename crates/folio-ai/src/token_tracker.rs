//! Token usage tracking across requests and models.

use std::collections::HashMap;

use crate::TokenUsage;

/// Tracks cumulative token usage per model.
#[derive(Debug, Default)]
pub struct TokenTracker {
    total: TokenUsage,
    by_model: HashMap<String, TokenUsage>,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from one completed request.
    pub fn record(&mut self, model: &str, usage: &TokenUsage) {
        self.total.input_tokens = self.total.input_tokens.saturating_add(usage.input_tokens);
        self.total.output_tokens = self.total.output_tokens.saturating_add(usage.output_tokens);
        self.call_count += 1;

        let entry = self.by_model.entry(model.to_string()).or_default();
        entry.input_tokens = entry.input_tokens.saturating_add(usage.input_tokens);
        entry.output_tokens = entry.output_tokens.saturating_add(usage.output_tokens);
    }

    pub fn total(&self) -> TokenUsage {
        self.total
    }

    pub fn for_model(&self, model: &str) -> Option<TokenUsage> {
        self.by_model.get(model).copied()
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}
