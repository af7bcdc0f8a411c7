//! Message dispatcher: one provider call per row, failure as data.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, error};

use crate::client::{TwilioClient, TwilioError};
use crate::domain::{CreateMessage, MessageText, MessagingServiceSid, PhoneNumber};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Capability to send one message and report the provider's message id.
///
/// The production implementation is [`TwilioSender`]; tests use an
/// in-memory recorder so dispatch logic is exercised without network calls.
pub trait MessageSender: Send + Sync {
    fn send_message<'a>(
        &'a self,
        to: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, Result<String, TwilioError>>;
}

/// Production sender: validates row values into domain types and creates a
/// message through the configured messaging service.
pub struct TwilioSender {
    client: TwilioClient,
    service: MessagingServiceSid,
}

impl TwilioSender {
    pub fn new(client: TwilioClient, service: MessagingServiceSid) -> Self {
        Self { client, service }
    }
}

impl MessageSender for TwilioSender {
    fn send_message<'a>(
        &'a self,
        to: &'a str,
        body: &'a str,
    ) -> BoxFuture<'a, Result<String, TwilioError>> {
        Box::pin(async move {
            let request = CreateMessage::new(PhoneNumber::new(to)?, MessageText::new(body)?);
            let resource = self.client.create_message(&request, &self.service).await?;
            Ok(resource.sid)
        })
    }
}

#[derive(Clone)]
/// Per-row dispatch boundary.
///
/// [`Dispatcher::dispatch`] makes exactly one send attempt and never lets an
/// error escape: any failure is logged with the offending phone number and
/// reported as `false`.
pub struct Dispatcher {
    sender: Arc<dyn MessageSender>,
}

impl Dispatcher {
    pub fn new(sender: Arc<dyn MessageSender>) -> Self {
        Self { sender }
    }

    /// Send one message; `true` when the provider accepted it.
    pub async fn dispatch(&self, phone: &str, message: &str) -> bool {
        match self.sender.send_message(phone, message).await {
            Ok(sid) => {
                debug!("SMS accepted: {sid}");
                true
            }
            Err(err) => {
                error!("issue with SMS send: {phone} - {err}");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;

    /// In-memory [`MessageSender`] recording every call.
    ///
    /// Calls to phones in `fail_phones` fail the way Twilio rejects a bad
    /// number; everything else is accepted with a generated sid.
    pub struct RecordingSender {
        calls: Mutex<Vec<(String, String)>>,
        fail_phones: HashSet<String>,
        counter: AtomicU64,
    }

    impl RecordingSender {
        pub fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_phones: HashSet::new(),
                counter: AtomicU64::new(0),
            }
        }

        pub fn failing_for(phones: impl IntoIterator<Item = impl Into<String>>) -> Self {
            let mut sender = Self::new();
            sender.fail_phones = phones.into_iter().map(Into::into).collect();
            sender
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl MessageSender for RecordingSender {
        fn send_message<'a>(
            &'a self,
            to: &'a str,
            body: &'a str,
        ) -> BoxFuture<'a, Result<String, TwilioError>> {
            Box::pin(async move {
                self.calls
                    .lock()
                    .unwrap()
                    .push((to.to_owned(), body.to_owned()));
                if self.fail_phones.contains(to) {
                    return Err(TwilioError::Api {
                        status: 400,
                        code: Some(21211),
                        message: Some(format!("Invalid 'To' Phone Number: {to}")),
                    });
                }
                let n = self.counter.fetch_add(1, Ordering::SeqCst);
                Ok(format!("SM{n:032}"))
            })
        }
    }
}
