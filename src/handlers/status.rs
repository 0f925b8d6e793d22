//! `GET /status`: liveness snapshot.

use serde::Serialize;
use serde_json::Value;

use crate::clock::{now_rfc3339, ServiceClock};
use crate::handlers::{to_json, Handler};
use crate::http::request::InboundRequest;

#[derive(Debug, Serialize)]
struct StatusReport {
    status: &'static str,
    port: u16,
    timestamp: String,
    /// Seconds since start.
    uptime: f64,
}

#[derive(Debug, Clone)]
pub struct StatusHandler {
    port: u16,
    clock: ServiceClock,
}

impl StatusHandler {
    pub fn new(port: u16, clock: ServiceClock) -> Self {
        Self { port, clock }
    }
}

impl Handler for StatusHandler {
    fn handle(&self, _request: &InboundRequest) -> Value {
        to_json(StatusReport {
            status: "running",
            port: self.port,
            timestamp: now_rfc3339(),
            uptime: self.clock.uptime_secs(),
        })
    }
}
