//! Inbound request extraction.
//!
//! # Responsibilities
//! - Capture method, path, original URL and headers of every call
//! - Decode the body into an untyped JSON value
//! - Reject unparseable JSON before any logging or dispatch happens
//!
//! # Design Decisions
//! - `application/json` is parsed strictly: only an object or array may sit
//!   at the top level, and any other input becomes a generic 400
//! - `application/x-www-form-urlencoded` decodes with bracket nesting and
//!   repeated keys as arrays (see [`crate::http::form`])
//! - Empty bodies and any other content type become `{}`
//! - Body size is enforced by the limit layer; an oversized body surfaces
//!   here as the extractor's 413 rejection

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, FromRequest, Request},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::http::form::decode_form;

/// A single inbound webhook call, owned for the duration of the request.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    /// Path component only; this is the route lookup key.
    pub path: String,
    /// Request target as received (path plus query string).
    pub url: String,
    pub headers: HeaderMap,
    pub body: Value,
    pub received_at: DateTime<Utc>,
}

impl InboundRequest {
    /// Build a request directly, mainly for exercising handlers in tests.
    pub fn new(method: Method, url: &str, body: Value) -> Self {
        let path = url.split('?').next().unwrap_or(url).to_string();
        Self {
            method,
            path,
            url: url.to_string(),
            headers: HeaderMap::new(),
            body,
            received_at: Utc::now(),
        }
    }
}

/// Body decoding failures. Raised by the transport layer, never by handlers.
#[derive(Debug, Error)]
pub enum BodyRejection {
    #[error(transparent)]
    Read(#[from] BytesRejection),

    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("JSON body must be an object or an array")]
    TopLevelScalar,
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        match self {
            BodyRejection::Read(rejection) => rejection.into_response(),
            other => {
                tracing::warn!(error = %other, "Rejected request with malformed JSON body");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Bad Request",
                        "message": "Request body could not be parsed",
                    })),
                )
                    .into_response()
            }
        }
    }
}

impl<S> FromRequest<S> for InboundRequest
where
    S: Send + Sync,
{
    type Rejection = BodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let received_at = Utc::now();
        let method = req.method().clone();
        let uri = req.uri().clone();
        let headers = req.headers().clone();

        let bytes = Bytes::from_request(req, state).await?;
        let body = decode_body(&headers, &bytes)?;

        let url = uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string());

        Ok(Self {
            method,
            path: uri.path().to_string(),
            url,
            headers,
            body,
            received_at,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Form,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "application/json" => BodyKind::Json,
        "application/x-www-form-urlencoded" => BodyKind::Form,
        _ => BodyKind::Other,
    }
}

/// Decode raw bytes according to the request's content type.
pub fn decode_body(headers: &HeaderMap, bytes: &[u8]) -> Result<Value, BodyRejection> {
    let Some(first) = bytes.iter().find(|b| !b.is_ascii_whitespace()) else {
        return Ok(Value::Object(Map::new()));
    };

    match body_kind(headers) {
        BodyKind::Json => {
            if !matches!(first, b'{' | b'[') {
                return Err(BodyRejection::TopLevelScalar);
            }
            Ok(serde_json::from_slice(bytes)?)
        }
        BodyKind::Form => Ok(decode_form(bytes)),
        BodyKind::Other => Ok(Value::Object(Map::new())),
    }
}
