//! Default handler for calls that match no route.
//!
//! Unknown callers are acknowledged with `200 OK` and their data echoed, so
//! a misconfigured sender never sees the service as down.

use serde::Serialize;
use serde_json::Value;

use crate::handlers::{to_json, Handler};
use crate::http::request::InboundRequest;
use crate::normalize::Source;

#[derive(Debug, Serialize)]
struct EchoAck<'a> {
    message: &'static str,
    method: &'a str,
    url: &'a str,
    data: &'a Value,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CatchAllHandler;

impl Handler for CatchAllHandler {
    fn handle(&self, request: &InboundRequest) -> Value {
        tracing::warn!(
            source = %Source::Unknown,
            method = %request.method,
            url = %request.url,
            "❓ Unbekannter Endpoint: {} {}\n📦 Data: {}",
            request.method,
            request.url,
            request.body
        );

        to_json(EchoAck {
            message: "Webhook empfangen",
            method: request.method.as_str(),
            url: &request.url,
            data: &request.body,
        })
    }
}
