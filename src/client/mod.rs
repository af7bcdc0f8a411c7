//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    AccountSid, AuthToken, CreateMessage, MessagePage, MessageResource, MessagingServiceResource,
    MessagingServiceSid, PageSize, ValidationError,
};

const DEFAULT_API_BASE: &str = "https://api.twilio.com";
const DEFAULT_MESSAGING_BASE: &str = "https://messaging.twilio.com";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

/// HTTP basic-auth credentials attached to every Twilio request.
#[derive(Debug, Clone, Copy)]
struct RequestAuth<'a> {
    username: &'a str,
    password: &'a str,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: RequestAuth<'a>,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;

    fn get<'a>(
        &'a self,
        url: &'a str,
        auth: RequestAuth<'a>,
        query: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        auth: RequestAuth<'a>,
        params: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .basic_auth(auth.username, Some(auth.password))
                .form(&params)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }

    fn get<'a>(
        &'a self,
        url: &'a str,
        auth: RequestAuth<'a>,
        query: Vec<(String, String)>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .get(url)
                .basic_auth(auth.username, Some(auth.password))
                .query(&query)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`TwilioClient`].
///
/// This error preserves:
/// - HTTP-level failures (transport failures or non-2xx without a Twilio body),
/// - API-level failures (non-2xx with a decoded Twilio error body),
/// - validation/parse failures.
pub enum TwilioError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status without a recognizable Twilio error body.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// Twilio returned an error body with a code and message.
    #[error("API error {status}: {message:?} (code {code:?})")]
    Api {
        status: u16,
        code: Option<i64>,
        message: Option<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`TwilioClient`].
///
/// Use this when you need to customize the API endpoints, timeout, or
/// user-agent.
pub struct TwilioClientBuilder {
    account_sid: AccountSid,
    auth_token: AuthToken,
    api_base: String,
    messaging_base: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl TwilioClientBuilder {
    /// Create a builder with the default endpoints and no timeout/user-agent
    /// override.
    pub fn new(account_sid: AccountSid, auth_token: AuthToken) -> Self {
        Self {
            account_sid,
            auth_token,
            api_base: DEFAULT_API_BASE.to_owned(),
            messaging_base: DEFAULT_MESSAGING_BASE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the base URL for the core API (`api.twilio.com`).
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = trim_trailing_slash(base.into());
        self
    }

    /// Override the base URL for the Messaging API (`messaging.twilio.com`).
    pub fn messaging_base(mut self, base: impl Into<String>) -> Self {
        self.messaging_base = trim_trailing_slash(base.into());
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`TwilioClient`].
    pub fn build(self) -> Result<TwilioClient, TwilioError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| TwilioError::Transport(Box::new(err)))?;

        Ok(TwilioClient {
            account_sid: self.account_sid,
            auth_token: self.auth_token,
            api_base: self.api_base,
            messaging_base: self.messaging_base,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

fn trim_trailing_slash(mut value: String) -> String {
    while value.ends_with('/') {
        value.pop();
    }
    value
}

#[derive(Clone)]
/// High-level Twilio REST client.
///
/// This type orchestrates request encoding, basic-auth, and response parsing.
/// By default it talks to:
/// - `https://api.twilio.com` for the Messages API
/// - `https://messaging.twilio.com` for messaging service lookups
pub struct TwilioClient {
    account_sid: AccountSid,
    auth_token: AuthToken,
    api_base: String,
    messaging_base: String,
    http: Arc<dyn HttpTransport>,
}

impl TwilioClient {
    /// Create a client using the default endpoints.
    ///
    /// For more customization, use [`TwilioClient::builder`].
    pub fn new(account_sid: AccountSid, auth_token: AuthToken) -> Self {
        Self {
            account_sid,
            auth_token,
            api_base: DEFAULT_API_BASE.to_owned(),
            messaging_base: DEFAULT_MESSAGING_BASE.to_owned(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(account_sid: AccountSid, auth_token: AuthToken) -> TwilioClientBuilder {
        TwilioClientBuilder::new(account_sid, auth_token)
    }

    fn auth(&self) -> RequestAuth<'_> {
        RequestAuth {
            username: self.account_sid.as_str(),
            password: self.auth_token.as_str(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_base,
            self.account_sid.as_str()
        )
    }

    fn service_url(&self, service: &MessagingServiceSid) -> String {
        format!("{}/v1/Services/{}", self.messaging_base, service.as_str())
    }

    /// Create (send) one outbound message through the configured messaging
    /// service.
    ///
    /// Errors:
    /// - [`TwilioError::Api`] when Twilio rejects the request with an error
    ///   body (bad number, auth failure, rate limit),
    /// - [`TwilioError::HttpStatus`] for other non-2xx responses,
    /// - [`TwilioError::Parse`] when a 2xx body is not a message resource.
    pub async fn create_message(
        &self,
        request: &CreateMessage,
        service: &MessagingServiceSid,
    ) -> Result<MessageResource, TwilioError> {
        let params = crate::transport::encode_create_message_form(request, service);
        let response = self
            .http
            .post_form(&self.messages_url(), self.auth(), params)
            .await
            .map_err(TwilioError::Transport)?;

        check_status(response.status, &response.body)?;

        crate::transport::decode_message_json(&response.body)
            .map_err(|err| TwilioError::Parse(Box::new(err)))
    }

    /// List the most recent messages on the account, at most `page_size`.
    ///
    /// The batch runner uses this with a page size of one as a cheap
    /// credential probe.
    pub async fn list_messages(&self, page_size: PageSize) -> Result<MessagePage, TwilioError> {
        let query = vec![(PageSize::FIELD.to_owned(), page_size.value().to_string())];
        let response = self
            .http
            .get(&self.messages_url(), self.auth(), query)
            .await
            .map_err(TwilioError::Transport)?;

        check_status(response.status, &response.body)?;

        crate::transport::decode_message_page_json(&response.body)
            .map_err(|err| TwilioError::Parse(Box::new(err)))
    }

    /// Fetch a messaging service by sid, proving that it exists and is
    /// visible to the authenticated account.
    pub async fn fetch_messaging_service(
        &self,
        service: &MessagingServiceSid,
    ) -> Result<MessagingServiceResource, TwilioError> {
        let response = self
            .http
            .get(&self.service_url(service), self.auth(), Vec::new())
            .await
            .map_err(TwilioError::Transport)?;

        check_status(response.status, &response.body)?;

        crate::transport::decode_service_json(&response.body)
            .map_err(|err| TwilioError::Parse(Box::new(err)))
    }
}

fn check_status(status: u16, body: &str) -> Result<(), TwilioError> {
    if (200..=299).contains(&status) {
        return Ok(());
    }

    if let Some(parsed) = crate::transport::decode_api_error_body(body) {
        return Err(TwilioError::Api {
            status,
            code: parsed.code.and_then(|code| code.into_i64()),
            message: parsed.message,
        });
    }

    let body = if body.trim().is_empty() {
        None
    } else {
        Some(body.to_owned())
    };
    Err(TwilioError::HttpStatus { status, body })
}
