//! Run orchestrator: validation gates first, then the table → chunk → row
//! dispatch loop.
//!
//! Validation failures terminate the run before any message is sent.
//! Once dispatching starts there is no rollback: every reachable row is
//! attempted, failures included, and each chunk's outcomes are flushed to
//! the delivery log as the chunk completes.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{info, warn};

use crate::client::{TwilioClient, TwilioError};
use crate::config::{ConfigError, DataDir, InputTable, Parameters};
use crate::delivery_log::{DeliveryLog, DeliveryLogEntry};
use crate::dispatch::{Dispatcher, TwilioSender};
use crate::domain::{AccountSid, AuthToken, MessagingServiceSid, PageSize};
use crate::reader::{REQUIRED_COLUMNS, ReadError, RowChunks, read_header};

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, thiserror::Error)]
/// Run-terminating failures.
///
/// Everything here maps to a non-zero process exit; per-row dispatch
/// failures never appear in this enum.
pub enum RunError {
    #[error("please configure the component: no parameters were provided")]
    EmptyConfig,

    #[error(
        "please enter your credentials: [Account SID], [Authentication Token], [Messaging Service SID]"
    )]
    MissingCredentials,

    #[error("please set the [Output Log] parameter")]
    MissingOutputLog,

    #[error("input tables are missing")]
    NoInputTables,

    #[error("[{table}] is missing required column: {column}")]
    MissingColumn { table: String, column: String },

    #[error("authorization failed, please check your credentials: {source}")]
    AuthorizationFailed {
        #[source]
        source: TwilioError,
    },

    #[error("invalid messaging service sid [{sid}]: {source}")]
    InvalidMessagingService {
        sid: String,
        #[source]
        source: TwilioError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Read(#[from] ReadError),
}

#[derive(Debug, Clone)]
/// Parameters that survived configuration validation.
pub struct ValidatedParams {
    pub account_sid: AccountSid,
    pub auth_token: AuthToken,
    pub messaging_service_sid: MessagingServiceSid,
    pub output_log: bool,
}

/// Live provider checks performed during validation.
///
/// Implemented by [`TwilioClient`]; tests substitute a stub so validation
/// logic runs without network access.
pub trait ProviderProbe: Send + Sync {
    /// Prove the credentials work by listing at most one existing message.
    fn check_credentials(&self) -> BoxFuture<'_, Result<(), TwilioError>>;

    /// Prove the messaging service sid resolves to an existing service.
    fn check_messaging_service<'a>(
        &'a self,
        service: &'a MessagingServiceSid,
    ) -> BoxFuture<'a, Result<(), TwilioError>>;
}

impl ProviderProbe for TwilioClient {
    fn check_credentials(&self) -> BoxFuture<'_, Result<(), TwilioError>> {
        Box::pin(async move {
            self.list_messages(PageSize::new(1)?).await?;
            Ok(())
        })
    }

    fn check_messaging_service<'a>(
        &'a self,
        service: &'a MessagingServiceSid,
    ) -> BoxFuture<'a, Result<(), TwilioError>> {
        Box::pin(async move {
            self.fetch_messaging_service(service).await?;
            Ok(())
        })
    }
}

/// Check that the configuration carries usable credentials.
pub fn validate_config(params: &Parameters) -> Result<ValidatedParams, RunError> {
    if params.is_empty() {
        return Err(RunError::EmptyConfig);
    }

    let account_sid = non_blank(params.account_sid.as_deref())
        .and_then(|value| AccountSid::new(value).ok())
        .ok_or(RunError::MissingCredentials)?;
    let auth_token = non_blank(params.auth_token.as_deref())
        .and_then(|value| AuthToken::new(value).ok())
        .ok_or(RunError::MissingCredentials)?;
    let messaging_service_sid = non_blank(params.messaging_service_sid.as_deref())
        .and_then(|value| MessagingServiceSid::new(value).ok())
        .ok_or(RunError::MissingCredentials)?;

    if params.output_log.is_none() {
        return Err(RunError::MissingOutputLog);
    }

    Ok(ValidatedParams {
        account_sid,
        auth_token,
        messaging_service_sid,
        output_log: params.output_log_enabled(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Check that at least one input table exists and that every table's header
/// carries the required columns.
pub fn validate_tables(tables: &[InputTable]) -> Result<(), RunError> {
    if tables.is_empty() {
        return Err(RunError::NoInputTables);
    }

    for table in tables {
        let header = read_header(&table.path)?;
        for column in REQUIRED_COLUMNS {
            if !header.iter().any(|name| name == column) {
                return Err(RunError::MissingColumn {
                    table: table.name.clone(),
                    column: column.to_owned(),
                });
            }
        }
    }

    Ok(())
}

/// Run the live provider checks.
pub async fn validate_provider(
    probe: &dyn ProviderProbe,
    service: &MessagingServiceSid,
) -> Result<(), RunError> {
    probe
        .check_credentials()
        .await
        .map_err(|source| RunError::AuthorizationFailed { source })?;

    probe
        .check_messaging_service(service)
        .await
        .map_err(|source| RunError::InvalidMessagingService {
            sid: service.as_str().to_owned(),
            source,
        })?;

    Ok(())
}

/// Dispatch every row of every table, flushing outcomes per chunk.
///
/// Rows are attempted strictly in input order, one at a time. A log write
/// failure is a warning, not a reason to stop; a table read failure ends
/// the run but leaves previously flushed chunks in place.
pub async fn dispatch_tables(
    tables: &[InputTable],
    dispatcher: &Dispatcher,
    log: Option<&DeliveryLog>,
    timestamp: &str,
) -> Result<(), RunError> {
    for table in tables {
        info!("parsing table: {}", table.name);

        for chunk in RowChunks::open_default(&table.path)? {
            let rows = chunk?;
            let mut outcomes = Vec::with_capacity(rows.len());
            for row in rows {
                let sent = dispatcher.dispatch(&row.phone_number, &row.message).await;
                outcomes.push(DeliveryLogEntry {
                    datetime: timestamp.to_owned(),
                    phone: row.phone_number,
                    message: row.message,
                    sent,
                });
            }

            if let Some(log) = log {
                if let Err(err) = log.write_batch(&outcomes) {
                    warn!("could not write delivery log: {err}");
                }
            }
        }
    }

    Ok(())
}

/// Validate tables and provider access, then dispatch everything.
pub async fn execute(
    tables: &[InputTable],
    params: &ValidatedParams,
    probe: &dyn ProviderProbe,
    dispatcher: &Dispatcher,
    log: &DeliveryLog,
) -> Result<(), RunError> {
    validate_tables(tables)?;
    validate_provider(probe, &params.messaging_service_sid).await?;

    let timestamp = chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string();
    let log = params.output_log.then_some(log);
    dispatch_tables(tables, dispatcher, log, &timestamp).await
}

/// Full run against a data directory: load configuration, validate, build
/// the Twilio client, and dispatch.
pub async fn run(data_dir: &DataDir) -> Result<(), RunError> {
    info!("loading configuration");
    let config = data_dir.load_config()?;
    let tables = data_dir.input_tables(&config);
    let names: Vec<&str> = tables.iter().map(|table| table.name.as_str()).collect();
    info!("input tables mapped: {names:?}");

    let params = validate_config(&config.parameters)?;

    let client = TwilioClient::new(params.account_sid.clone(), params.auth_token.clone());
    let dispatcher = Dispatcher::new(Arc::new(TwilioSender::new(
        client.clone(),
        params.messaging_service_sid.clone(),
    )));
    let log = DeliveryLog::new(&data_dir.out_tables_dir());

    execute(&tables, &params, &client, &dispatcher, &log).await?;

    info!("batch SMS run finished");
    Ok(())
}
