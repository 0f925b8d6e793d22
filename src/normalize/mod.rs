//! Source normalization subsystem.
//!
//! # Data Flow
//! ```text
//! raw body (serde_json::Value, any shape)
//!     → alias.rs (probe ordered key lists, fall back to defaults)
//!     → sipgate.rs / whatsapp.rs / passthrough.rs (assemble fields)
//!     → envelope.rs (NormalizedEnvelope + wire serialization)
//! ```
//!
//! # Design Decisions
//! - Normalization is total: missing or empty keys degrade to `"unknown"`
//! - Values are never coerced; type checking is left to the consumer
//! - The raw body is carried verbatim for later reconciliation
//! - Timestamps come from the local clock, never from the payload

pub mod alias;
pub mod envelope;
pub mod passthrough;
pub mod sipgate;
pub mod whatsapp;

use serde_json::Value;

pub use alias::{is_set, probe, FieldAlias, UNKNOWN};
pub use envelope::{MappedFields, NormalizedEnvelope, Source};
pub use passthrough::PassthroughNormalizer;
pub use sipgate::SipgateNormalizer;
pub use whatsapp::WhatsappNormalizer;

/// Maps an arbitrary body to a normalized envelope for one source.
pub trait Normalizer: Send + Sync + std::fmt::Debug {
    /// Source tag carried by every envelope this normalizer produces.
    fn source(&self) -> Source;

    /// Build an envelope from a raw body. Must not fail or panic.
    fn normalize(&self, body: &Value) -> NormalizedEnvelope;
}
