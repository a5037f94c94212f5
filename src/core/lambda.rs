use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const HELLO_MESSAGE: &str = "Hello from Lambda!";

/// API Gateway proxy integration response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaResponse {
    pub status_code: u16,
    pub body: String,
    pub headers: BTreeMap<String, String>,
}

pub fn cors_headers() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        ),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Access-Control-Allow-Methods".to_string(), "*".to_string()),
    ])
}

pub fn hello_response() -> LambdaResponse {
    LambdaResponse {
        status_code: 200,
        body: serde_json::json!({ "message": HELLO_MESSAGE }).to_string(),
        headers: cors_headers(),
    }
}

/// The event payload is not inspected; every invocation gets the same answer.
pub fn handle_event(event: &serde_json::Value) -> LambdaResponse {
    tracing::debug!("lambda invoked with event: {}", event);
    hello_response()
}

impl IntoResponse for LambdaResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        for (name, value) in &self.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!("skipping invalid header {}: {}", name, value),
            }
        }
        response
    }
}
