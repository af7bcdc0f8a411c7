use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio account identifier (`AC...`).
///
/// Invariant: non-empty after trimming. The value doubles as the HTTP
/// basic-auth username for every API call.
pub struct AccountSid(String);

impl AccountSid {
    /// Configuration key carrying the account sid.
    pub const FIELD: &'static str = "account_sid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Twilio auth token.
///
/// Invariant: must not be empty. The token is a secret: `Debug` output is
/// redacted so the value never reaches logs by accident.
pub struct AuthToken(String);

impl AuthToken {
    /// Configuration key carrying the auth token (encrypted by the platform).
    pub const FIELD: &'static str = "#auth_token";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio messaging service identifier (`MG...`).
///
/// Invariant: non-empty after trimming. Used as the origin of every
/// outbound message instead of a `From` number.
pub struct MessagingServiceSid(String);

impl MessagingServiceSid {
    /// Form field name used by the Messages API (`MessagingServiceSid`).
    pub const FIELD: &'static str = "MessagingServiceSid";

    /// Create a validated [`MessagingServiceSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone number as sent to Twilio (`To`).
///
/// Invariant: non-empty after trimming. This type does not normalize or
/// verify the number; a malformed value is the provider's to reject, one
/// row at a time.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Form field name used by the Messages API (`To`).
    pub const FIELD: &'static str = "To";

    /// Create a validated [`PhoneNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the number exactly as it will be sent.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`Body`).
///
/// Invariant: non-empty after trimming. The original value (including
/// whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by the Messages API (`Body`).
    pub const FIELD: &'static str = "Body";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
