//! Trace verification binary.
//!
//! Replays a Quint ITF trace against the handshake model and exits non-zero
//! on any divergence.
//!
//! ```bash
//! # Explicit path
//! tcp-conform out/trace.itf.json
//!
//! # Or via the environment, as the quint workflow sets it
//! QUINT_TRACE_PATH=out/trace.itf.json tcp-conform
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const TRACE_PATH_ENV: &str = "QUINT_TRACE_PATH";
const DEFAULT_TRACE: &str = "trace.itf.json";

/// Replay a Quint ITF trace against the TCP handshake model
#[derive(Parser, Debug)]
#[command(name = "tcp-conform")]
#[command(version)]
struct Args {
    /// Path to the ITF trace (falls back to $QUINT_TRACE_PATH, then trace.itf.json)
    trace: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let path = args.trace.unwrap_or_else(|| {
        std::env::var_os(TRACE_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_TRACE), PathBuf::from)
    });

    tracing::info!(path = %path.display(), "verifying trace");
    match tcp_conform::verify_path(&path) {
        Ok(()) => {
            tracing::info!("trace verified successfully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
