//! Downstream automation hand-off.
//!
//! The real automation call (an Apify actor run) is not made; the
//! [`SimulatedSink`] logs the payload it would have sent instead.

use crate::normalize::NormalizedEnvelope;

/// Receives normalized envelopes for the automation pipeline.
pub trait AutomationSink: Send + Sync + std::fmt::Debug {
    /// Hand an envelope off. Must not block or fail the calling request.
    fn submit(&self, envelope: &NormalizedEnvelope);
}

/// Logs envelopes instead of forwarding them.
#[derive(Debug, Clone)]
pub struct SimulatedSink {
    actor: String,
}

impl SimulatedSink {
    pub fn new(actor: impl Into<String>) -> Self {
        Self {
            actor: actor.into(),
        }
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }
}

impl AutomationSink for SimulatedSink {
    fn submit(&self, envelope: &NormalizedEnvelope) {
        let payload = serde_json::to_string_pretty(envelope)
            .unwrap_or_else(|e| format!("<unserializable envelope: {}>", e));
        tracing::info!(
            actor = %self.actor,
            source = %envelope.source,
            "🎯 Apify Payload würde sein:\n{}",
            payload
        );
    }
}
