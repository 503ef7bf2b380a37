use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::ChatRequestError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

/// The exchange normally answers `{"token": ...}`; older tenants used `jwt`
/// or `access_token`.
#[derive(Debug, Deserialize)]
pub struct AuthorizeResponse {
    #[serde(alias = "jwt", alias = "access_token")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Outcome of a relayed question.
///
/// Serializes flat: `{"status":"success", ...payload}` or
/// `{"status":"error","code":..,"msg":..}`.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatResult {
    /// Upstream payload; any upstream `status` field is dropped in favour of the tag.
    Success(Map<String, Value>),
    Error { code: u16, msg: String },
}

impl ChatResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, ChatResult::Success(_))
    }

    /// HTTP-style status for the result: 200 on success, the error code otherwise.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            ChatResult::Success(_) => 200,
            ChatResult::Error { code, .. } => *code,
        }
    }

    /// Typed view of a successful payload.
    #[must_use]
    pub fn answer(&self) -> Option<ChatAnswer> {
        match self {
            ChatResult::Success(payload) => Some(ChatAnswer::from_payload(payload)),
            ChatResult::Error { .. } => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut out = Map::new();
        match self {
            ChatResult::Success(payload) => {
                out.extend(payload.iter().map(|(k, v)| (k.clone(), v.clone())));
                out.insert("status".into(), Value::from("success"));
            }
            ChatResult::Error { code, msg } => {
                out.insert("status".into(), Value::from("error"));
                out.insert("code".into(), Value::from(*code));
                out.insert("msg".into(), Value::from(msg.as_str()));
            }
        }
        Value::Object(out)
    }
}

impl From<ChatRequestError> for ChatResult {
    fn from(error: ChatRequestError) -> Self {
        ChatResult::Error {
            code: error.status_code(),
            msg: error.to_string(),
        }
    }
}

impl Serialize for ChatResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ChatResult::Success(payload) => {
                let mut map = serializer.serialize_map(None)?;
                map.serialize_entry("status", "success")?;
                for (k, v) in payload.iter().filter(|(k, _)| k.as_str() != "status") {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            ChatResult::Error { code, msg } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("status", "error")?;
                map.serialize_entry("code", code)?;
                map.serialize_entry("msg", msg)?;
                map.end()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedContent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Normalized reading of a ChatCBI answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnswer {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub suggestions: Vec<String>,
    pub related_content: Vec<RelatedContent>,
}

impl ChatAnswer {
    /// ChatCBI puts the text in `message` and references in `sources`;
    /// `answer`/`citations` are accepted as fallbacks.
    #[must_use]
    pub fn from_payload(payload: &Map<String, Value>) -> Self {
        let answer = ["message", "answer"]
            .iter()
            .filter_map(|k| payload.get(*k).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
            .to_string();

        let citations = ["sources", "citations"]
            .iter()
            .find_map(|k| payload.get(*k).filter(|v| v.is_array()))
            .map(list_of::<Citation>)
            .unwrap_or_default();

        let suggestions = payload
            .get("suggestions")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let related_content = payload
            .get("relatedContent")
            .map(list_of::<RelatedContent>)
            .unwrap_or_default();

        Self {
            answer,
            citations,
            suggestions,
            related_content,
        }
    }
}

// Malformed entries are skipped rather than failing the whole answer.
fn list_of<T: serde::de::DeserializeOwned>(value: &Value) -> Vec<T> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}
