use crate::domain::value::{MessageText, PhoneNumber};

/// Maximum `PageSize` accepted by the Messages API list endpoint.
pub const LIST_MESSAGES_MAX_PAGE_SIZE: u32 = 1000;

#[derive(Debug, Clone)]
/// A single outbound message for the Messages API.
///
/// The origin of the message is the messaging service configured on the
/// client, not a per-request `From` number.
pub struct CreateMessage {
    to: PhoneNumber,
    body: MessageText,
}

impl CreateMessage {
    pub fn new(to: PhoneNumber, body: MessageText) -> Self {
        Self { to, body }
    }

    pub fn to(&self) -> &PhoneNumber {
        &self.to
    }

    pub fn body(&self) -> &MessageText {
        &self.body
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Page size for listing messages (`PageSize`).
///
/// Invariant: between 1 and [`LIST_MESSAGES_MAX_PAGE_SIZE`].
pub struct PageSize(u32);

impl PageSize {
    /// Query parameter name used by the Messages API (`PageSize`).
    pub const FIELD: &'static str = "PageSize";

    pub fn new(value: u32) -> Result<Self, crate::domain::ValidationError> {
        if !(1..=LIST_MESSAGES_MAX_PAGE_SIZE).contains(&value) {
            return Err(crate::domain::ValidationError::PageSizeOutOfRange {
                min: 1,
                max: LIST_MESSAGES_MAX_PAGE_SIZE,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}
