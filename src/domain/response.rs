#[derive(Debug, Clone, PartialEq, Eq)]
/// A message resource as returned by the Messages API.
pub struct MessageResource {
    pub sid: String,
    pub status: Option<String>,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One page of message resources from the list endpoint.
pub struct MessagePage {
    pub messages: Vec<MessageResource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A messaging service resource as returned by the Messaging API.
pub struct MessagingServiceResource {
    pub sid: String,
    pub friendly_name: Option<String>,
}
