//! Failure response bodies.
//!
//! The backend answers errors either with JSON `{ "errors": [{ "type", "message" }] }`
//! or with plain text such as `err:SOME_CODE`. [`ErrorBody::from_bytes`] decides
//! which one it got by looking at the content.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Backend error type whose message embeds `[err:CODE] text`.
pub const ERR_EXEC: &str = "ErrExec";

/// One entry of a structured error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    /// The entry as received, kept when its `message` is not a string.
    #[serde(skip)]
    raw: Option<String>,
}

impl BackendError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            raw: None,
        }
    }

    pub fn is_exec(&self) -> bool {
        self.kind == ERR_EXEC
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => {
                let kind = map.get("type").and_then(Value::as_str).unwrap_or_default();
                match map.get("message") {
                    Some(Value::String(message)) => Self::new(kind, message.as_str()),
                    _ => Self {
                        raw: Some(value.to_string()),
                        ..Self::new(kind, "")
                    },
                }
            }
            Value::String(s) => Self::new("", s.as_str()),
            other => Self::new("", other.to_string()),
        }
    }

    /// The entry as the backend sent it: the message, or the JSON form when
    /// there is no string message.
    pub fn raw_text(&self) -> String {
        if !self.message.is_empty() {
            return self.message.clone();
        }
        match &self.raw {
            Some(raw) => raw.clone(),
            None => serde_json::to_string(self).unwrap_or_default(),
        }
    }
}

/// Body of a failed response, classified at the client boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    /// JSON object carrying an `errors` array (possibly empty).
    Structured(Vec<BackendError>),
    /// Any other non-empty body.
    PlainText(String),
    /// No body, or only whitespace / JSON null.
    Empty,
}

impl ErrorBody {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let text = String::from_utf8_lossy(bytes);
        if text.trim().is_empty() {
            return ErrorBody::Empty;
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => match map.get("errors") {
                Some(Value::Array(entries)) => {
                    ErrorBody::Structured(entries.iter().map(BackendError::from_value).collect())
                }
                _ => ErrorBody::PlainText(text.into_owned()),
            },
            Ok(Value::String(s)) if s.is_empty() => ErrorBody::Empty,
            Ok(Value::String(s)) => ErrorBody::PlainText(s),
            Ok(Value::Null) => ErrorBody::Empty,
            _ => ErrorBody::PlainText(text.into_owned()),
        }
    }

    /// Structured entries; empty for the other variants.
    pub fn errors(&self) -> &[BackendError] {
        match self {
            ErrorBody::Structured(errors) => errors,
            _ => &[],
        }
    }

    pub fn plain_text(&self) -> Option<&str> {
        match self {
            ErrorBody::PlainText(text) => Some(text),
            _ => None,
        }
    }

    /// The body rendered as a string, `None` when empty.
    pub fn as_text(&self) -> Option<String> {
        match self {
            ErrorBody::Structured(errors) => {
                Some(serde_json::json!({ "errors": errors }).to_string())
            }
            ErrorBody::PlainText(text) => Some(text.clone()),
            ErrorBody::Empty => None,
        }
    }
}
