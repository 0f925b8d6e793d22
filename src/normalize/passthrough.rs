//! Identity normalization for the test endpoint.

use serde_json::Value;

use crate::clock::now_rfc3339;
use crate::normalize::envelope::{MappedFields, NormalizedEnvelope, Source};
use crate::normalize::Normalizer;

/// Echoes the body without alias resolution.
#[derive(Debug, Clone, Copy)]
pub struct PassthroughNormalizer {
    source: Source,
}

impl PassthroughNormalizer {
    pub fn new(source: Source) -> Self {
        Self { source }
    }
}

impl Default for PassthroughNormalizer {
    fn default() -> Self {
        Self::new(Source::Test)
    }
}

impl Normalizer for PassthroughNormalizer {
    fn source(&self) -> Source {
        self.source
    }

    fn normalize(&self, body: &Value) -> NormalizedEnvelope {
        NormalizedEnvelope {
            source: self.source,
            fields: MappedFields::Passthrough,
            timestamp: now_rfc3339(),
            raw_original: body.clone(),
        }
    }
}
