//! Local loopback for the chunked transfer path.

mod config;
mod loopback;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "photolink-loopback")]
#[command(about = "Send a file through the chunked transfer path and write the reassembled copy")]
struct Args {
    /// File to send.
    input: PathBuf,

    /// Where to write the reassembled file.
    output: PathBuf,

    /// Optional TOML configuration (message keys, chunk size, transfer id).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    run(&args)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = config::Config::load(args.config.as_deref())?;
    tracing::info!(
        chunk_size = config.chunk_size,
        transfer_id = config.transfer_id,
        "configuration loaded"
    );

    let data = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    tracing::info!(path = %args.input.display(), size = data.len(), "sending file");

    let file = loopback::run(&config, &data)?;
    std::fs::write(&args.output, &file.data)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(path = %args.output.display(), size = file.total(), "wrote reassembled file");
    Ok(())
}
