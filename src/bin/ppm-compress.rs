//! Compress a file with an order-N PPM model.
//!
//! Usage:
//!   cargo run --release --features cli --bin ppm-compress -- input.bin output.ppm
//!   ppm-compress --order 2 input.bin output.ppm

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ppm_stream::ModelOrder;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Compress a file with PPM + arithmetic coding")]
struct Args {
    /// File to compress
    input: PathBuf,

    /// Where to write the compressed stream
    output: PathBuf,

    /// Model order (-1..=16). Higher orders use more memory.
    #[arg(short, long, default_value_t = ModelOrder::DEFAULT, allow_negative_numbers = true)]
    order: ModelOrder,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let (input, output) = (args.input.display(), args.output.display());
    let read = ppm_stream::compress_file(&args.input, &args.output, args.order)
        .with_context(|| format!("failed to compress {input} into {output}"))?;

    let packed = std::fs::metadata(&args.output)
        .with_context(|| format!("failed to stat {output}"))?
        .len();
    tracing::info!(order = args.order.get(), read, packed, "done");
    Ok(())
}
