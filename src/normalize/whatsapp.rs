//! Messaging (WhatsApp) normalization.

use serde_json::Value;

use crate::clock::now_rfc3339;
use crate::config::WhatsappAliases;
use crate::normalize::alias::FieldAlias;
use crate::normalize::envelope::{MappedFields, NormalizedEnvelope, Source};
use crate::normalize::Normalizer;

/// Maps a WhatsApp message webhook onto `message_data`.
#[derive(Debug, Clone)]
pub struct WhatsappNormalizer {
    from: FieldAlias,
    message: FieldAlias,
}

impl WhatsappNormalizer {
    pub fn new(aliases: &WhatsappAliases) -> Self {
        Self {
            from: FieldAlias::new(aliases.from.clone()),
            message: FieldAlias::new(aliases.message.clone()),
        }
    }
}

impl Default for WhatsappNormalizer {
    fn default() -> Self {
        Self::new(&WhatsappAliases::default())
    }
}

impl Normalizer for WhatsappNormalizer {
    fn source(&self) -> Source {
        Source::Whatsapp
    }

    fn normalize(&self, body: &Value) -> NormalizedEnvelope {
        NormalizedEnvelope {
            source: Source::Whatsapp,
            fields: MappedFields::Message {
                from: self.from.resolve(body),
                message: self.message.resolve(body),
            },
            timestamp: now_rfc3339(),
            raw_original: body.clone(),
        }
    }
}
