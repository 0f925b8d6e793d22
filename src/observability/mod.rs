//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! startup
//!     → logging.rs (install tracing subscriber)
//!
//! every inbound call (after body parsing, before dispatch)
//!     → request_log.rs (timestamp, method, URL, headers, body)
//!
//! Consumers:
//!     → stdout (human-readable or JSON lines)
//! ```
//!
//! # Design Decisions
//! - Structured fields (method, url, request_id) alongside a readable message
//! - Request ID comes from the `x-request-id` header set by the server layer
//! - The request logger is an observer only

#[cfg(test)]
pub(crate) mod capture;
pub mod logging;
pub mod request_log;

pub use logging::init_tracing;
pub use request_log::log_request;
