//! Decompress a file produced by `ppm-compress`.
//!
//! Usage:
//!   cargo run --release --features cli --bin ppm-decompress -- input.ppm output.bin
//!   ppm-decompress --order 2 input.ppm output.bin
//!
//! The order must match the one used to compress; it is not stored in the file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ppm_stream::ModelOrder;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Decompress a PPM + arithmetic coded file")]
struct Args {
    /// Compressed input file
    input: PathBuf,

    /// Where to write the decompressed bytes
    output: PathBuf,

    /// Model order the file was compressed with (-1..=16)
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
    let written = ppm_stream::decompress_file(&args.input, &args.output, args.order)
        .with_context(|| format!("failed to decompress {input} into {output}"))?;

    tracing::info!(order = args.order.get(), written, "done");
    Ok(())
}
