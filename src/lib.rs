//! Webhook ingestion service library.
//!
//! Accepts webhook calls from telephony (sipgate), messaging (WhatsApp) and
//! ad-hoc test senders, logs each call and normalizes it into a uniform
//! envelope for a downstream automation pipeline.
//!
//! ```text
//!   inbound call
//!       → http::request      (decode body, 400 on malformed JSON)
//!       → observability      (request log)
//!       → routing            (exact (method, path) lookup)
//!       → handlers           (normalize / status / info / catch-all)
//!       → JSON response
//! ```

pub mod clock;
pub mod config;
pub mod downstream;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod normalize;
pub mod observability;
pub mod routing;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
