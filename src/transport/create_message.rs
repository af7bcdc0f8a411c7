use serde::Deserialize;

use crate::domain::{CreateMessage, MessageResource, MessageText, MessagingServiceSid, PhoneNumber};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResource {
    sid: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_code: Option<TransportErrorCode>,
    #[serde(default)]
    error_message: Option<String>,
}

// Twilio documents `error_code` as an integer but has been observed
// returning it as a quoted string in older API responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportErrorCode {
    Int(i64),
    String(String),
}

impl TransportErrorCode {
    fn into_i64(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::String(value) => value.trim().parse::<i64>().ok(),
        }
    }
}

impl From<MessageJsonResource> for MessageResource {
    fn from(value: MessageJsonResource) -> Self {
        Self {
            sid: value.sid,
            status: value.status,
            error_code: value.error_code.and_then(TransportErrorCode::into_i64),
            error_message: value.error_message,
        }
    }
}

pub fn encode_create_message_form(
    request: &CreateMessage,
    service: &MessagingServiceSid,
) -> Vec<(String, String)> {
    vec![
        (PhoneNumber::FIELD.to_owned(), request.to().as_str().to_owned()),
        (
            MessagingServiceSid::FIELD.to_owned(),
            service.as_str().to_owned(),
        ),
        (
            MessageText::FIELD.to_owned(),
            request.body().as_str().to_owned(),
        ),
    ]
}

pub fn decode_message_json(json: &str) -> Result<MessageResource, TransportError> {
    let parsed: MessageJsonResource = serde_json::from_str(json)?;
    Ok(parsed.into())
}
