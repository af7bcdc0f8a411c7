//! Transport layer: HTTP wire-format details (serialization/deserialization).

mod api_error;
mod create_message;
mod fetch_service;
mod list_messages;

pub use api_error::decode_api_error_body;
pub use create_message::{decode_message_json, encode_create_message_form};
pub use fetch_service::decode_service_json;
pub use list_messages::decode_message_page_json;
