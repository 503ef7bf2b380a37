use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

/// HTTP method from an API Gateway v2 (`requestContext.http.method`) or v1
/// (`httpMethod`) event, upper-cased.
#[must_use]
pub fn request_method(payload: &Value) -> Option<String> {
    v_str(payload, &["requestContext", "http", "method"])
        .or_else(|| v_str(payload, &["httpMethod"]))
        .map(str::to_ascii_uppercase)
}

#[must_use]
pub fn request_path(payload: &Value) -> Option<&str> {
    v_str(payload, &["rawPath"]).or_else(|| v_str(payload, &["path"]))
}

/// Raw request body, decoding base64 when API Gateway flagged it.
///
/// # Errors
///
/// Returns an error if the body is flagged as base64 but does not decode to UTF-8.
pub fn request_body(payload: &Value) -> Result<Option<String>, String> {
    let Some(body) = payload.get("body").and_then(Value::as_str) else {
        return Ok(None);
    };

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !encoded {
        return Ok(Some(body.to_string()));
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| format!("Failed to decode base64 body: {e}"))?;
    String::from_utf8(bytes)
        .map(Some)
        .map_err(|e| format!("Body is not valid UTF-8: {e}"))
}

/// Pulls a non-blank `message` string out of a JSON request body.
#[must_use]
pub fn extract_message(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}
