//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, body limit, request ID)
//!     → request.rs (decode body into InboundRequest, or reject with 400)
//!         → form.rs (nested urlencoded decoding)
//!     → observability::request_log (log the call)
//!     → routing::Dispatcher (pick handler, build JSON)
//!     → Send to client
//! ```

pub mod form;
pub mod request;
pub mod server;

pub use request::{BodyRejection, InboundRequest};
pub use server::{handle_inbound, AppState, HttpServer};
