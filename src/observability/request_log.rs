//! Per-request diagnostic logging.
//!
//! Runs for every call that made it past body parsing, before dispatch.
//! It only reads the request; it cannot reject or alter it.

use axum::http::HeaderMap;
use serde_json::{Map, Value};

use crate::http::request::InboundRequest;

/// Whether a body carries anything worth printing.
///
/// `null`, `{}`, `[]` and `""` count as empty.
pub fn has_content(body: &Value) -> bool {
    match body {
        Value::Null => false,
        Value::Object(map) => !map.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::String(s) => !s.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Headers as a JSON object. Repeated headers are joined with `", "`.
pub fn headers_to_json(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        map.insert(name.as_str().to_string(), Value::String(joined));
    }
    Value::Object(map)
}

/// Emit the diagnostic record for one inbound call.
pub fn log_request(request: &InboundRequest) {
    let received_at = request
        .received_at
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
    let request_id = request
        .headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    let headers = pretty(&headers_to_json(&request.headers));

    if has_content(&request.body) {
        tracing::info!(
            %received_at,
            request_id,
            method = %request.method,
            url = %request.url,
            "🔄 {}\n📨 {} {}\n📋 Headers: {}\n📦 Body: {}",
            received_at,
            request.method,
            request.url,
            headers,
            pretty(&request.body),
        );
    } else {
        tracing::info!(
            %received_at,
            request_id,
            method = %request.method,
            url = %request.url,
            "🔄 {}\n📨 {} {}\n📋 Headers: {}",
            received_at,
            request.method,
            request.url,
            headers,
        );
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
