//! Batch SMS dispatcher for Twilio.
//!
//! Reads CSV tables of recipients from a platform data directory, sends one
//! SMS per row through a Twilio messaging service, and records every attempt
//! in an incremental delivery log.
//!
//! The library layers are:
//! - [`domain`]: validated value types for everything that crosses the API,
//! - `transport`: wire encoding/decoding for the Twilio REST API (private),
//! - [`client`]: the async [`client::TwilioClient`],
//! - [`config`], [`reader`], [`delivery_log`]: the data-directory contract,
//! - [`dispatch`], [`runner`]: the per-row send boundary and the run
//!   orchestrator.
//!
//! # Example
//!
//! ```no_run
//! use smsbatch::config::DataDir;
//!
//! # async fn example() -> Result<(), smsbatch::runner::RunError> {
//! let data_dir = DataDir::new("/data");
//! smsbatch::runner::run(&data_dir).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod delivery_log;
pub mod dispatch;
pub mod domain;
pub mod logging;
pub mod reader;
pub mod runner;
mod transport;

pub use client::{TwilioClient, TwilioClientBuilder, TwilioError};
pub use runner::{RunError, run};
