//! The normalized event record handed to the automation pipeline.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// External system an envelope originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Sipgate,
    Whatsapp,
    Test,
    Unknown,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Sipgate => "sipgate",
            Source::Whatsapp => "whatsapp",
            Source::Test => "test",
            Source::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source-specific fields resolved from the raw body.
#[derive(Debug, Clone, PartialEq)]
pub enum MappedFields {
    /// Telephony call metadata.
    Call {
        from: Value,
        to: Value,
        direction: Value,
    },
    /// Messaging metadata.
    Message { from: Value, message: Value },
    /// Nothing mapped; the body is carried as-is.
    Passthrough,
}

/// A normalized inbound event.
///
/// `raw_original` is always the untouched inbound body, whatever
/// `fields` resolved to.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEnvelope {
    pub source: Source,
    pub fields: MappedFields,
    pub timestamp: String,
    pub raw_original: Value,
}

#[derive(Serialize)]
struct CallData<'a> {
    from: &'a Value,
    to: &'a Value,
    direction: &'a Value,
    timestamp: &'a str,
    original_data: &'a Value,
}

#[derive(Serialize)]
struct MessageData<'a> {
    from: &'a Value,
    message: &'a Value,
    timestamp: &'a str,
    original_data: &'a Value,
}

/// Wire shape: `{source, call_data | message_data}` for mapped sources,
/// `{source, timestamp, original_data}` for pass-through envelopes.
impl Serialize for NormalizedEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("source", &self.source)?;
        match &self.fields {
            MappedFields::Call { from, to, direction } => {
                map.serialize_entry(
                    "call_data",
                    &CallData {
                        from,
                        to,
                        direction,
                        timestamp: &self.timestamp,
                        original_data: &self.raw_original,
                    },
                )?;
            }
            MappedFields::Message { from, message } => {
                map.serialize_entry(
                    "message_data",
                    &MessageData {
                        from,
                        message,
                        timestamp: &self.timestamp,
                        original_data: &self.raw_original,
                    },
                )?;
            }
            MappedFields::Passthrough => {
                map.serialize_entry("timestamp", &self.timestamp)?;
                map.serialize_entry("original_data", &self.raw_original)?;
            }
        }
        map.end()
    }
}
