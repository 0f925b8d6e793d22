//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! InboundRequest (method, path)
//!     → dispatcher.rs (owns the table, runs the handler)
//!     → router.rs (exact lookup)
//!     → Return: matched handler or the catch-all
//!
//! Route Compilation (at startup):
//!     ServiceConfig (port, alias tables)
//!     → build normalizers and handlers
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Exact (method, path) keys; the query string is ignored
//! - Deterministic: same input always matches same route
//! - Unmatched calls are never rejected; they go to the catch-all

pub mod dispatcher;
pub mod router;

pub use dispatcher::Dispatcher;
pub use router::{RouteMatch, RouteTable};
