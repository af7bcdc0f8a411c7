#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use smsbatch::config::DataDir;

#[derive(Debug, Parser)]
#[command(name = "smsbatch", version, about = "Batch SMS dispatcher for Twilio")]
struct Cli {
    /// Platform data directory (config.json, in/tables, out/tables).
    #[arg(long, default_value = "/data")]
    data_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    smsbatch::logging::init();

    info!(
        "smsbatch {} starting, data dir: {}",
        env!("CARGO_PKG_VERSION"),
        cli.data_dir.display()
    );

    let data_dir = DataDir::new(cli.data_dir);
    match smsbatch::runner::run(&data_dir).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
