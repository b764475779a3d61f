//! API response envelopes
//!
//! The admin API is not uniform: mutations answer with
//! `{ "message": ..., "<entity>": {...} }`, dashboard endpoints wrap
//! their payload in `{ "data": ... }`, and errors carry
//! `{ "message": ..., "statusCode": ... }`.

use serde::{Deserialize, Serialize};

/// `{ "data": T }` wrapper used by the dashboard endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

impl<T> DataEnvelope<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Error body returned with non-success statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message; some endpoints send an array of messages
    #[serde(default, deserialize_with = "message_or_list")]
    pub message: String,
    #[serde(rename = "statusCode", default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl ApiErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
        }
    }
}

/// Plain `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

fn message_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Message {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Message::deserialize(deserializer)? {
        Message::One(s) => s,
        Message::Many(list) => list.join("; "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_accepts_message_list() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":["title must be a string","position must be a number"],"statusCode":400}"#)
                .unwrap();
        assert_eq!(body.message, "title must be a string; position must be a number");
        assert_eq!(body.status_code, Some(400));
    }

    #[test]
    fn error_body_tolerates_missing_fields() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_empty());
        assert!(body.status_code.is_none());
    }
}
