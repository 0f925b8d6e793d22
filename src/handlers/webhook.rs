//! Per-source webhook endpoints (`/webhook/sipgate`, `/webhook/whatsapp`).

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::downstream::AutomationSink;
use crate::handlers::{to_json, Handler};
use crate::http::request::InboundRequest;
use crate::normalize::{
    NormalizedEnvelope, Normalizer, SipgateNormalizer, Source, WhatsappNormalizer,
};

#[derive(Debug, Serialize)]
struct WebhookAck<'a> {
    success: bool,
    message: &'static str,
    apify_payload: &'a NormalizedEnvelope,
}

/// Normalizes a source's payload, hands it downstream and acknowledges it.
#[derive(Debug)]
pub struct WebhookHandler {
    normalizer: Box<dyn Normalizer>,
    sink: Arc<dyn AutomationSink>,
    message: &'static str,
}

impl WebhookHandler {
    pub fn new(
        normalizer: Box<dyn Normalizer>,
        sink: Arc<dyn AutomationSink>,
        message: &'static str,
    ) -> Self {
        Self {
            normalizer,
            sink,
            message,
        }
    }

    pub fn sipgate(normalizer: SipgateNormalizer, sink: Arc<dyn AutomationSink>) -> Self {
        Self::new(Box::new(normalizer), sink, "SipGate Call verarbeitet")
    }

    pub fn whatsapp(normalizer: WhatsappNormalizer, sink: Arc<dyn AutomationSink>) -> Self {
        Self::new(Box::new(normalizer), sink, "WhatsApp Message verarbeitet")
    }
}

impl Handler for WebhookHandler {
    fn handle(&self, request: &InboundRequest) -> Value {
        let source = self.normalizer.source();
        match source {
            Source::Sipgate => tracing::info!(%source, "📞 === SIPGATE WEBHOOK ===\n🔗 SipGate Data: {}", request.body),
            Source::Whatsapp => tracing::info!(%source, "💬 === WHATSAPP WEBHOOK ===\n📱 WhatsApp Data: {}", request.body),
            _ => tracing::info!(%source, "Webhook data: {}", request.body),
        }

        let envelope = self.normalizer.normalize(&request.body);
        self.sink.submit(&envelope);

        to_json(WebhookAck {
            success: true,
            message: self.message,
            apify_payload: &envelope,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downstream::SimulatedSink;
    use axum::http::Method;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records submitted envelopes.
    #[derive(Debug, Default)]
    struct RecordingSink {
        seen: Mutex<Vec<NormalizedEnvelope>>,
    }

    impl AutomationSink for RecordingSink {
        fn submit(&self, envelope: &NormalizedEnvelope) {
            self.seen.lock().unwrap().push(envelope.clone());
        }
    }

    #[test]
    fn test_sipgate_ack() {
        let sink = Arc::new(SimulatedSink::new("apify"));
        let handler = WebhookHandler::sipgate(SipgateNormalizer::default(), sink);
        let body = json!({"from": "+491234", "to": "+495678"});
        let response = handler.handle(&InboundRequest::new(Method::POST, "/webhook/sipgate", body.clone()));

        assert_eq!(response["success"], true);
        assert_eq!(response["message"], "SipGate Call verarbeitet");
        let call = &response["apify_payload"]["call_data"];
        assert_eq!(response["apify_payload"]["source"], "sipgate");
        assert_eq!(call["from"], "+491234");
        assert_eq!(call["to"], "+495678");
        assert_eq!(call["direction"], "incoming");
        assert!(call["timestamp"].is_string());
        assert_eq!(call["original_data"], body);
    }

    #[test]
    fn test_whatsapp_submits_envelope() {
        let sink = Arc::new(RecordingSink::default());
        let handler = WebhookHandler::whatsapp(WhatsappNormalizer::default(), sink.clone());
        let body = json!({"sender": "+4917", "text": "Hallo"});
        let response = handler.handle(&InboundRequest::new(Method::POST, "/webhook/whatsapp", body.clone()));

        assert_eq!(response["message"], "WhatsApp Message verarbeitet");
        assert_eq!(response["apify_payload"]["message_data"]["from"], "+4917");
        assert_eq!(response["apify_payload"]["message_data"]["message"], "Hallo");

        let seen = sink.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].source, Source::Whatsapp);
        assert_eq!(seen[0].raw_original, body);
    }
}
