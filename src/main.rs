// Entry point for the image-compressor command line.
// The lib.rs file serves as the public API; this file only wires up logging,
// argument parsing and Ctrl-C handling.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use image_compressor_lib::cli::{Cli, Command, CompressArgs};
use image_compressor_lib::compress_images;
use image_compressor_lib::core::{CancelFlag, JsonSink, ProgressSink, TextSink};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    debug!("=== Image Compressor Starting ===");

    match cli.command {
        Command::Compress(args) => run_compress(args).await,
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)         // Remove file path
        .with_line_number(false)  // Remove line numbers
        .with_thread_ids(false)   // Remove thread IDs
        .with_thread_names(false) // Remove thread names
        .with_target(false)       // Remove module path
        .with_writer(io::stderr)  // stdout carries the progress lines
        .compact()
        .init();
}

async fn run_compress(args: CompressArgs) -> ExitCode {
    let job = match args.to_job() {
        Ok(job) => job,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let sink: Box<dyn ProgressSink + Send> = if args.json {
        Box::new(JsonSink::new(io::stdout()))
    } else {
        Box::new(TextSink::new(io::stdout()))
    };

    let cancel = CancelFlag::new();
    let watcher = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping at the next iteration boundary");
            watcher.cancel();
        }
    });

    match compress_images(job, sink, cancel).await {
        Ok(summary) => {
            info!(
                "Done: {} of {} file(s) processed, {} -> {} bytes",
                summary.processed(),
                summary.total,
                summary.bytes_before,
                summary.bytes_after
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
