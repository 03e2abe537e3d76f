//! HTTP-shaped responses for API Gateway.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;

use crate::error::Error;

/// Message in the body of every 500 response.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Response of a Lambda proxy integration.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded body.
    pub body: String,
}

impl ApiGatewayResponse {
    /// Adds a header, replacing any default of the same name.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Parses the body.
    pub fn json_body(&self) -> Result<serde_json::Value, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Headers of every response.
pub fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
    ])
}

/// Makes a response with a JSON-encoded payload.
pub fn success_response(
    status_code: u16,
    payload: &impl Serialize,
) -> Result<ApiGatewayResponse, Error> {
    Ok(ApiGatewayResponse {
        status_code,
        headers: default_headers(),
        body: serde_json::to_string(payload)?,
    })
}

/// Makes the 500 response for any error.
pub fn internal_error_response(
    err: &impl std::fmt::Display,
) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 500,
        headers: default_headers(),
        body: json!({
            "error": err.to_string(),
            "message": INTERNAL_SERVER_ERROR_MESSAGE,
        }).to_string(),
    }
}
