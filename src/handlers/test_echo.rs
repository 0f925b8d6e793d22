//! `POST /test`: echoes the received payload back to the caller.

use serde::Serialize;
use serde_json::Value;

use crate::handlers::{to_json, Handler};
use crate::http::request::InboundRequest;
use crate::normalize::{Normalizer, PassthroughNormalizer};

#[derive(Debug, Serialize)]
struct TestAck<'a> {
    success: bool,
    message: &'static str,
    received_data: &'a Value,
    timestamp: &'a str,
}

#[derive(Debug, Clone, Default)]
pub struct TestEchoHandler {
    normalizer: PassthroughNormalizer,
}

impl TestEchoHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Handler for TestEchoHandler {
    fn handle(&self, request: &InboundRequest) -> Value {
        tracing::info!("🧪 === TEST WEBHOOK ===\n📋 Test Data: {}", request.body);

        let envelope = self.normalizer.normalize(&request.body);
        to_json(TestAck {
            success: true,
            message: "Test erfolgreich",
            received_data: &envelope.raw_original,
            timestamp: &envelope.timestamp,
        })
    }
}
