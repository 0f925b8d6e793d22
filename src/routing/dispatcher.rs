//! Request dispatch.
//!
//! Builds the service's route table once from configuration and sends each
//! inbound request to exactly one handler.

use std::sync::Arc;

use axum::http::Method;
use serde_json::Value;

use crate::clock::ServiceClock;
use crate::config::ServiceConfig;
use crate::downstream::AutomationSink;
use crate::handlers::info::{SIPGATE_PATH, STATUS_PATH, TEST_PATH, WHATSAPP_PATH};
use crate::handlers::{
    CatchAllHandler, InfoHandler, StatusHandler, TestEchoHandler, WebhookHandler,
};
use crate::http::request::InboundRequest;
use crate::normalize::{SipgateNormalizer, WhatsappNormalizer};
use crate::routing::router::{RouteMatch, RouteTable};

#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: RouteTable,
}

impl Dispatcher {
    pub fn new(table: RouteTable) -> Self {
        Self { table }
    }

    /// Build the standard route table.
    ///
    /// The port reported by `/` and `/status` and the alias tables used by the
    /// normalizers come from `config`.
    pub fn from_config(
        config: &ServiceConfig,
        clock: ServiceClock,
        sink: Arc<dyn AutomationSink>,
    ) -> Self {
        let port = config.listener.port;
        let sipgate = SipgateNormalizer::new(&config.aliases.sipgate);
        let whatsapp = WhatsappNormalizer::new(&config.aliases.whatsapp);

        let table = RouteTable::new(Arc::new(CatchAllHandler))
            .route(Method::GET, "/", Arc::new(InfoHandler::new(port)))
            .route(
                Method::POST,
                SIPGATE_PATH,
                Arc::new(WebhookHandler::sipgate(sipgate, sink.clone())),
            )
            .route(
                Method::POST,
                WHATSAPP_PATH,
                Arc::new(WebhookHandler::whatsapp(whatsapp, sink)),
            )
            .route(Method::POST, TEST_PATH, Arc::new(TestEchoHandler::new()))
            .route(Method::GET, STATUS_PATH, Arc::new(StatusHandler::new(port, clock)));

        Self::new(table)
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Route a request and run its handler.
    pub fn dispatch(&self, request: &InboundRequest) -> Value {
        let matched = self.table.lookup(&request.method, &request.path);
        if let RouteMatch::Fallback(_) = matched {
            tracing::debug!(method = %request.method, path = %request.path, "No route matched, using catch-all");
        }
        matched.handler().handle(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downstream::SimulatedSink;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        Dispatcher::from_config(
            &ServiceConfig::default(),
            ServiceClock::start(),
            Arc::new(SimulatedSink::new("apify")),
        )
    }

    #[test]
    fn test_route_table_contents() {
        let d = dispatcher();
        assert_eq!(
            d.table().entries(),
            vec![
                (Method::GET, "/".to_string()),
                (Method::GET, "/status".to_string()),
                (Method::POST, "/test".to_string()),
                (Method::POST, "/webhook/sipgate".to_string()),
                (Method::POST, "/webhook/whatsapp".to_string()),
            ]
        );
    }

    #[test]
    fn test_sipgate_scenario() {
        let body = json!({"from": "+491234", "to": "+495678"});
        let response = dispatcher().dispatch(&InboundRequest::new(Method::POST, "/webhook/sipgate", body.clone()));
        let call = &response["apify_payload"]["call_data"];

        assert_eq!(call["from"], "+491234");
        assert_eq!(call["to"], "+495678");
        assert_eq!(call["direction"], "incoming");
        assert!(call["timestamp"].is_string());
        assert_eq!(call["original_data"], body);
        assert_eq!(call.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_secondary_alias_through_dispatch() {
        let response = dispatcher().dispatch(&InboundRequest::new(
            Method::POST,
            "/webhook/sipgate",
            json!({"caller": "+49123"}),
        ));
        assert_eq!(response["apify_payload"]["call_data"]["from"], "+49123");
        assert_eq!(response["apify_payload"]["call_data"]["to"], "unknown");
    }

    #[test]
    fn test_catch_all_only_for_unrouted_pairs() {
        let d = dispatcher();
        let cases = [
            (Method::POST, "/unknown/path", true),
            (Method::GET, "/webhook/sipgate", true),
            (Method::POST, "/status", true),
            (Method::DELETE, "/", true),
            (Method::GET, "/status", false),
            (Method::POST, "/webhook/whatsapp", false),
        ];

        for (method, path, expect_catch_all) in cases {
            let response = d.dispatch(&InboundRequest::new(method.clone(), path, json!({})));
            let is_catch_all = response["message"] == "Webhook empfangen";
            assert_eq!(is_catch_all, expect_catch_all, "{method} {path}");
            assert_eq!(d.table().contains(&method, path), !expect_catch_all);
        }
    }

    #[test]
    fn test_configured_port_is_reported() {
        let mut config = ServiceConfig::default();
        config.listener.port = 8123;
        let d = Dispatcher::from_config(&config, ServiceClock::start(), Arc::new(SimulatedSink::new("apify")));

        let status = d.dispatch(&InboundRequest::new(Method::GET, "/status", json!({})));
        assert_eq!(status["port"], 8123);

        let info = d.dispatch(&InboundRequest::new(Method::GET, "/", json!({})));
        assert_eq!(info["ngrok"], "Starte ngrok mit: ngrok http 8123");
    }
}
