//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{CreateMessage, LIST_MESSAGES_MAX_PAGE_SIZE, PageSize};
pub use response::{MessagePage, MessageResource, MessagingServiceResource};
pub use validation::ValidationError;
pub use value::{AccountSid, AuthToken, MessageText, MessagingServiceSid, PhoneNumber};
