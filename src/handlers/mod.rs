//! Endpoint handlers.
//!
//! Every handler is synchronous and total: it receives an already-parsed
//! [`InboundRequest`] and always produces a JSON body answered with `200 OK`.

pub mod catch_all;
pub mod info;
pub mod status;
pub mod test_echo;
pub mod webhook;

use serde::Serialize;
use serde_json::Value;

use crate::http::request::InboundRequest;

pub use catch_all::CatchAllHandler;
pub use info::InfoHandler;
pub use status::StatusHandler;
pub use test_echo::TestEchoHandler;
pub use webhook::WebhookHandler;

/// A route target in the dispatcher's table.
pub trait Handler: Send + Sync + std::fmt::Debug {
    /// Produce the response body for a request. Must not fail.
    fn handle(&self, request: &InboundRequest) -> Value;
}

/// Serialize a response body. Response types only have string keys, so this
/// cannot fail in practice; a failure is logged and answered with `null`.
pub(crate) fn to_json<T: Serialize>(body: T) -> Value {
    serde_json::to_value(body).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to serialize response body");
        Value::Null
    })
}
