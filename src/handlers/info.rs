//! Root info page listing the available endpoints.

use serde::Serialize;
use serde_json::Value;

use crate::handlers::{to_json, Handler};
use crate::http::request::InboundRequest;

pub const SIPGATE_PATH: &str = "/webhook/sipgate";
pub const WHATSAPP_PATH: &str = "/webhook/whatsapp";
pub const TEST_PATH: &str = "/test";
pub const STATUS_PATH: &str = "/status";

#[derive(Debug, Serialize)]
struct Endpoints {
    sipgate: &'static str,
    whatsapp: &'static str,
    test: &'static str,
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct InfoPage {
    message: &'static str,
    endpoints: Endpoints,
    ngrok: String,
}

/// `GET /`
#[derive(Debug, Clone)]
pub struct InfoHandler {
    port: u16,
}

impl InfoHandler {
    pub fn new(port: u16) -> Self {
        Self { port }
    }
}

impl Handler for InfoHandler {
    fn handle(&self, _request: &InboundRequest) -> Value {
        to_json(InfoPage {
            message: "🚀 Webhook Test Server läuft!",
            endpoints: Endpoints {
                sipgate: SIPGATE_PATH,
                whatsapp: WHATSAPP_PATH,
                test: TEST_PATH,
                status: STATUS_PATH,
            },
            ngrok: format!("Starte ngrok mit: ngrok http {}", self.port),
        })
    }
}
