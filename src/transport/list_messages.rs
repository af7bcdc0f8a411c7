use serde::Deserialize;

use crate::domain::{MessagePage, MessageResource};

use super::create_message::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct MessagePageJsonResponse {
    #[serde(default)]
    messages: Vec<MessageJsonItem>,
}

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonItem {
    sid: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
    #[serde(default)]
    error_message: Option<String>,
}

pub fn decode_message_page_json(json: &str) -> Result<MessagePage, TransportError> {
    let parsed: MessagePageJsonResponse = serde_json::from_str(json)?;
    let messages = parsed
        .messages
        .into_iter()
        .map(|item| MessageResource {
            sid: item.sid,
            status: item.status,
            error_code: item.error_code,
            error_message: item.error_message,
        })
        .collect();
    Ok(MessagePage { messages })
}
