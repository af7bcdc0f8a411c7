use serde::Deserialize;

/// Error body returned by Twilio on non-2xx responses.
///
/// Example: `{"code": 21211, "message": "Invalid 'To' Phone Number",
/// "more_info": "...", "status": 400}`. Not every non-2xx response carries
/// this shape, so decoding is best-effort.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<TransportCode>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TransportCode {
    Int(i64),
    String(String),
}

impl TransportCode {
    pub fn into_i64(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value),
            Self::String(value) => value.trim().parse::<i64>().ok(),
        }
    }
}

pub fn decode_api_error_body(body: &str) -> Option<ApiErrorBody> {
    serde_json::from_str::<ApiErrorBody>(body).ok().filter(|parsed| {
        // An empty object decodes fine but carries no error information.
        parsed.code.is_some() || parsed.message.is_some()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_standard_error_body() {
        let json = r#"{"code": 21211, "message": "Invalid 'To' Phone Number", "more_info": "https://www.twilio.com/docs/errors/21211", "status": 400}"#;
        let parsed = decode_api_error_body(json).unwrap();
        assert_eq!(parsed.code.unwrap().into_i64(), Some(21211));
        assert_eq!(parsed.message.as_deref(), Some("Invalid 'To' Phone Number"));
        assert_eq!(parsed.status, Some(400));
    }

    #[test]
    fn decodes_string_code() {
        let json = r#"{"code": "20003", "message": "Authenticate"}"#;
        let parsed = decode_api_error_body(json).unwrap();
        assert_eq!(parsed.code.unwrap().into_i64(), Some(20003));
    }

    #[test]
    fn rejects_bodies_without_error_information() {
        assert!(decode_api_error_body("{}").is_none());
        assert!(decode_api_error_body("not json").is_none());
        assert!(decode_api_error_body("").is_none());
    }
}
