//! Response builders for the proxy Lambda.
//!
//! Every response carries the same permissive CORS headers so browser
//! clients can call the relay directly.

use serde::Serialize;
use serde_json::{Value, json};

fn cors_headers() -> Value {
    json!({
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": "POST, OPTIONS",
        "Access-Control-Allow-Headers": "Content-Type",
        "Content-Type": "application/json"
    })
}

/// Returns a response with the given status and a JSON-serialized body.
#[must_use]
pub fn json_response<T: Serialize>(status_code: u16, body: &T) -> Value {
    let body = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    json!({
        "statusCode": status_code,
        "headers": cors_headers(),
        "body": body
    })
}

/// Returns a 200 OK response with an empty body, used for CORS preflight.
#[must_use]
pub fn ok_empty() -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": ""
    })
}

/// Returns an error response shaped like a relay error result.
#[must_use]
pub fn err_response(status_code: u16, message: &str) -> Value {
    json_response(status_code, &json!({ "status": "error", "msg": message }))
}
