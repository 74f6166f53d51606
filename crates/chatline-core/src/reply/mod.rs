//! Reply generation for the real-time gateway.
//!
//! [`ReplyGenerator`] is the single-method capability the gateway calls for
//! every inbound frame. The implementations here are deterministic stubs: no
//! model call, no network, no randomness. An integrator plugs a real model in
//! by implementing the trait and handing it to the application state.

use std::sync::Arc;

use chatline_types::config::ReplyMode;

/// Maps an inbound message to the text sent back to the client.
pub trait ReplyGenerator: Send + Sync {
    fn reply(&self, content: &str) -> String;
}

/// Keyword-driven canned answers.
///
/// Matching is case-insensitive and checks "start" before "help".
#[derive(Debug, Clone, Copy, Default)]
pub struct CannedReplyGenerator;

impl ReplyGenerator for CannedReplyGenerator {
    fn reply(&self, content: &str) -> String {
        let lowered = content.to_lowercase();
        if lowered.contains("start") {
            "Let's get started! What would you like to do next?".to_string()
        } else if lowered.contains("help") {
            "How can I assist you today?".to_string()
        } else {
            format!("AI response to: {content}")
        }
    }
}

/// Returns the input prefixed with `Echo: `.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoReplyGenerator;

impl ReplyGenerator for EchoReplyGenerator {
    fn reply(&self, content: &str) -> String {
        format!("Echo: {content}")
    }
}

/// Build the generator selected in configuration.
pub fn build_reply_generator(mode: ReplyMode) -> Arc<dyn ReplyGenerator> {
    match mode {
        ReplyMode::Canned => Arc::new(CannedReplyGenerator),
        ReplyMode::Echo => Arc::new(EchoReplyGenerator),
    }
}
