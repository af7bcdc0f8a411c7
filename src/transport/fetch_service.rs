use serde::Deserialize;

use crate::domain::MessagingServiceResource;

use super::create_message::TransportError;

#[derive(Debug, Clone, Deserialize)]
struct ServiceJsonResource {
    sid: String,
    #[serde(default)]
    friendly_name: Option<String>,
}

pub fn decode_service_json(json: &str) -> Result<MessagingServiceResource, TransportError> {
    let parsed: ServiceJsonResource = serde_json::from_str(json)?;
    Ok(MessagingServiceResource {
        sid: parsed.sid,
        friendly_name: parsed.friendly_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_service_resource() {
        let json = r#"
        {
          "sid": "MG0123456789abcdef",
          "friendly_name": "Notifications",
          "inbound_request_url": null
        }
        "#;

        let service = decode_service_json(json).unwrap();
        assert_eq!(service.sid, "MG0123456789abcdef");
        assert_eq!(service.friendly_name.as_deref(), Some("Notifications"));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(decode_service_json("oops").is_err());
    }
}
