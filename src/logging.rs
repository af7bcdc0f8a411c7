//! Logging setup.
//!
//! Events go to stdout by default. When the platform injects a log
//! collector address (`KBC_LOGGER_ADDR` / `KBC_LOGGER_PORT`), events are
//! shipped to it as JSON lines over TCP instead.

use std::net::TcpStream;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log collector host.
pub const LOGGER_ADDR_ENV: &str = "KBC_LOGGER_ADDR";
/// Environment variable holding the log collector TCP port.
pub const LOGGER_PORT_ENV: &str = "KBC_LOGGER_PORT";

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. When the collector address is
/// set but unreachable, logging falls back to stdout so the run itself is
/// not lost.
pub fn init() {
    match collector_target() {
        Some((host, port)) => match TcpStream::connect((host.as_str(), port)) {
            Ok(stream) => {
                tracing_subscriber::fmt()
                    .json()
                    .with_env_filter(default_filter())
                    .with_writer(Mutex::new(stream))
                    .init();
            }
            Err(err) => {
                init_stdout();
                tracing::warn!("log collector {host}:{port} unreachable, using stdout: {err}");
            }
        },
        None => init_stdout(),
    }
}

fn init_stdout() {
    tracing_subscriber::fmt()
        .with_env_filter(default_filter())
        .with_target(false)
        .init();
}

fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Read the collector target from the environment, if fully specified.
fn collector_target() -> Option<(String, u16)> {
    let host = std::env::var(LOGGER_ADDR_ENV).ok()?;
    let port = std::env::var(LOGGER_PORT_ENV).ok()?;
    parse_target(&host, &port)
}

fn parse_target(host: &str, port: &str) -> Option<(String, u16)> {
    let host = host.trim();
    if host.is_empty() {
        return None;
    }
    let port: u16 = port.trim().parse().ok()?;
    Some((host.to_owned(), port))
}
