//! Proxy Lambda handler - thin router in front of the ChatCBI relay.
//!
//! This module handles:
//! - Health checks
//! - CORS preflight for the chat route
//! - Request validation (method, body, message)
//! - Relaying the question and mapping the result to an HTTP status

use chrono::Utc;
use lambda_runtime::{Error, LambdaEvent};
use serde_json::{Value, json};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{helpers, parsing};
use crate::clients::ChatCbiClient;
use crate::core::models::ChatResult;

pub use self::function_handler as handler;

pub const HEALTH_ROUTE: &str = "/health";
pub const CHAT_ROUTE: &str = "/api/chatcbi";

/// Lambda handler for the proxy entrypoint.
///
/// Always answers with an API Gateway proxy response; request problems are
/// reported as 4xx bodies rather than Lambda errors.
///
/// # Errors
///
/// Never returns an error today; the `Result` matches the `lambda_runtime`
/// service contract.
#[tracing::instrument(level = "info", skip_all, fields(request_id = %Uuid::new_v4()))]
pub async fn function_handler(
    client: &ChatCbiClient,
    event: LambdaEvent<Value>,
) -> Result<Value, Error> {
    let payload = &event.payload;
    let method = parsing::request_method(payload).unwrap_or_default();
    let path = parsing::request_path(payload).unwrap_or("/");
    info!(method = %method, path = %path, "Proxy received request");

    // ========================================================================
    // Health check
    // ========================================================================

    if path.ends_with(HEALTH_ROUTE) {
        return Ok(helpers::json_response(
            200,
            &json!({
                "status": "ok",
                "message": "ChatCBI proxy is running",
                "timestamp": Utc::now().to_rfc3339(),
            }),
        ));
    }

    if !path.ends_with(CHAT_ROUTE) {
        warn!(path = %path, "Unknown route");
        return Ok(helpers::err_response(404, "Not found"));
    }

    // ========================================================================
    // Chat route
    // ========================================================================

    match method.as_str() {
        "OPTIONS" => return Ok(helpers::ok_empty()),
        "POST" => {}
        _ => return Ok(helpers::err_response(405, "Method not allowed")),
    }

    let body = match parsing::request_body(payload) {
        Ok(body) => body.unwrap_or_default(),
        Err(e) => {
            error!("Invalid request body: {}", e);
            return Ok(helpers::err_response(400, &e));
        }
    };

    let Some(message) = parsing::extract_message(&body) else {
        return Ok(helpers::err_response(400, "Message is required"));
    };

    let result = client.ask(&message).await;
    let status = http_status(&result);
    info!(
        status,
        code = result.status_code(),
        success = result.is_success(),
        "Relayed ChatCBI request"
    );

    Ok(helpers::json_response(status, &result))
}

/// An error result that carries a 2xx code (an unreadable upstream body)
/// is reported as 502 so callers checking `response.ok` see the failure.
fn http_status(result: &ChatResult) -> u16 {
    match result {
        ChatResult::Error { code, .. } if (200..300).contains(code) => 502,
        other => other.status_code(),
    }
}
