//! mirrorsync - Keep a destination directory identical to a source directory.
//!
//! Usage:
//!   mirrorsync SOURCE DESTINATION INTERVAL LOG          Sync every INTERVAL seconds
//!   mirrorsync SOURCE DESTINATION INTERVAL LOG --exact  Compare files by content digest
//!   mirrorsync SOURCE DESTINATION INTERVAL LOG --once   Run a single pass and exit
//!   mirrorsync --help                                   Show help

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use mirrorsync_core::{CompareStrategy, DEFAULT_CHUNK_SIZE, SyncConfig};
use mirrorsync_ops::{SyncController, SyncError, SyncReport};

#[derive(Parser)]
#[command(
    name = "mirrorsync",
    version,
    about = "One-way directory mirroring on an interval",
    long_about = "mirrorsync makes DESTINATION match SOURCE: missing files and folders are \
                  created, changed files are copied again, and anything that exists only in \
                  DESTINATION is removed. SOURCE is never modified."
)]
struct Cli {
    /// Directory to read from
    source: PathBuf,

    /// Directory to make identical to the source
    destination: PathBuf,

    /// Seconds to wait between passes
    interval: u64,

    /// File that receives one line per applied action
    log: PathBuf,

    /// Compare files by content digest instead of size and modification time
    #[arg(short, long, visible_alias = "sha256", short_alias = 's')]
    exact: bool,

    /// Read buffer size in bytes for --exact
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Run a single pass and exit
    #[arg(long)]
    once: bool,

    /// Print each pass report as JSON on stdout
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn config(&self) -> Result<SyncConfig> {
        let strategy = if self.exact {
            CompareStrategy::Exact
        } else {
            CompareStrategy::Fast
        };

        SyncConfig::builder()
            .source(self.source.clone())
            .destination(self.destination.clone())
            .strategy(strategy)
            .interval_secs(self.interval)
            .chunk_size(self.chunk_size)
            .log_file(Some(self.log.clone()))
            .build()
            .context("Invalid configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = cli.config()?;

    let (dispatch, _guard) = init_logging(&cli.log)?;
    tracing::dispatcher::set_global_default(dispatch.clone())
        .context("Failed to install log subscriber")?;

    let controller = SyncController::from_config(&config)
        .context("Cannot start sync")?
        .with_dispatch(dispatch);
    let controller = Arc::new(controller);

    tracing::info!(
        source = %controller.executor().source().display(),
        destination = %controller.executor().destination().display(),
        strategy = %config.strategy,
        interval_secs = config.interval_secs,
        "mirrorsync started"
    );

    loop {
        match run_pass(Arc::clone(&controller)).await? {
            Ok(report) => {
                if cli.json {
                    println!("{}", serde_json::to_string(&report)?);
                }
            }
            Err(err) => {
                tracing::error!(category = %err.category(), error = %err, "Error on execution");
                if cli.once {
                    return Err(err).context("Sync pass failed");
                }
            }
        }

        if cli.once {
            break;
        }

        tracing::debug!("Interval sleep of {}s", config.interval_secs);
        tokio::select! {
            _ = tokio::time::sleep(config.interval()) => {}
            signal = tokio::signal::ctrl_c() => {
                signal.context("Failed to listen for Ctrl-C")?;
                tracing::info!("Interrupted, stopping");
                break;
            }
        }
    }

    Ok(())
}

/// Run one pass on a blocking worker and wait for it.
async fn run_pass(controller: Arc<SyncController>) -> Result<Result<SyncReport, SyncError>> {
    tokio::task::spawn_blocking(move || controller.execute())
        .await
        .context("Sync worker panicked")
}

/// Build the subscriber: the log file gets every event, stderr a compact copy.
///
/// The returned guard flushes the file writer on drop and must outlive the
/// last event.
fn init_logging(log_file: &Path) -> Result<(Dispatch, WorkerGuard)> {
    let file_name = log_file
        .file_name()
        .ok_or_else(|| eyre!("Log path has no file name: {}", log_file.display()))?;
    let directory = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(directory)
        .with_context(|| format!("Cannot create log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer);

    Ok((Dispatch::new(subscriber), guard))
}
