//! Request handler.
//!
//! [`handle`] never fails: every error is turned into the same 500 response
//! by [`internal_error_response`].

use serde_json::Value;
use tracing::{Level, event};

use crate::clock::Clock;
use crate::config::Config;
use crate::context::{InvocationContext, require_request_id};
use crate::error::Error;
use crate::greeting::{Greeting, GreetingRecord};
use crate::response::{
    ApiGatewayResponse,
    internal_error_response,
    success_response,
};
use crate::store::RecordStore;

/// Handles a single invocation.
///
/// `event` is opaque; it is only inspected for logging. A record is written
/// to `store` if one is given, and a failed write fails the invocation.
pub async fn handle(
    event: &Value,
    context: Option<&InvocationContext>,
    config: &Config,
    store: Option<&dyn RecordStore>,
    clock: &dyn Clock,
) -> ApiGatewayResponse {
    log_request(event);
    match respond(context, config, store, clock).await {
        Ok(response) => response,
        Err(err) => {
            event!(Level::ERROR, "failed to handle request: {}", err);
            internal_error_response(&err)
        },
    }
}

async fn respond(
    context: Option<&InvocationContext>,
    config: &Config,
    store: Option<&dyn RecordStore>,
    clock: &dyn Clock,
) -> Result<ApiGatewayResponse, Error> {
    let request_id = require_request_id(context)?;
    let greeting = Greeting::new(clock.now(), config.environment());
    if let Some(store) = store {
        let record = GreetingRecord::from_greeting(request_id, &greeting);
        store.put(&record).await?;
        event!(Level::INFO, "recorded greeting for {}", request_id);
    }
    success_response(200, &greeting)
}

fn log_request(event: &Value) {
    match event.as_object() {
        Some(object) => {
            let method = object.get("httpMethod").and_then(Value::as_str);
            let path = object.get("path").and_then(Value::as_str);
            event!(
                Level::INFO,
                "request: {} {}",
                method.unwrap_or("-"),
                path.unwrap_or("-"),
            );
        },
        None => event!(Level::INFO, "request: opaque event"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use crate::clock::FixedClock;
    use crate::store::MemoryStore;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn handle_greets_without_store() {
        let context = InvocationContext::new("abc-123");
        let config = Config::new(None, Some("test".to_string()));
        let response = handle(
            &json!({}),
            Some(&context),
            &config,
            None,
            &clock(),
        ).await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.json_body().unwrap(), json!({
            "message": "Hello from Serverless Application!",
            "timestamp": "2024-05-01T12:00:00.000000Z",
            "environment": "test",
        }));
    }

    #[tokio::test]
    async fn handle_records_the_same_greeting_it_returns() {
        let store = MemoryStore::new();
        let context = InvocationContext::new("req-42");
        let config = Config::new(Some("orders".to_string()), None);
        let response = handle(
            &json!({ "httpMethod": "GET", "path": "/hello" }),
            Some(&context),
            &config,
            Some(&store),
            &clock(),
        ).await;
        assert_eq!(response.status_code, 200);
        let body = response.json_body().unwrap();
        assert_eq!(body["environment"], "unknown");
        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "req-42");
        assert_eq!(items[0].message, body["message"]);
        assert_eq!(items[0].timestamp, body["timestamp"]);
    }

    #[tokio::test]
    async fn handle_turns_missing_context_into_500() {
        let store = MemoryStore::new();
        let response = handle(
            &Value::Null,
            None,
            &Config::default(),
            Some(&store),
            &clock(),
        ).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.json_body().unwrap(), json!({
            "error": "Invalid context: no invocation context",
            "message": "Internal server error",
        }));
        assert!(store.items().is_empty());
    }

    #[tokio::test]
    async fn handle_turns_store_failure_into_500() {
        let store = MemoryStore::failing("table not found");
        let context = InvocationContext::new("req-1");
        let response = handle(
            &json!([]),
            Some(&context),
            &Config::new(Some("missing".to_string()), None),
            Some(&store),
            &clock(),
        ).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.headers["Access-Control-Allow-Origin"], "*");
        let body = response.json_body().unwrap();
        assert_eq!(body["error"], "Store error: table not found");
        assert_eq!(body["message"], "Internal server error");
    }
}
