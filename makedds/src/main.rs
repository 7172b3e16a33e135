//! makedds - compose images into a DDS file
//!
//! Converts a single image or a JSON manifest describing arrays, cube maps,
//! and volumes into a DDS file with an optional mipmap chain.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use makedds::Job;

#[derive(Parser)]
#[command(name = "makedds")]
#[command(about = "Compose images into a DDS file")]
#[command(version)]
struct Cli {
    /// Input image or .json manifest
    input: PathBuf,

    /// Output .dds file
    output: PathBuf,

    /// Generate a full mipmap chain
    #[arg(long)]
    mipmap: bool,

    /// Round dimensions up to the next power of two
    #[arg(long)]
    pow2: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();

    let mut job = create_job(&cli)?;

    let summary = makedds::write_dds_file(&mut job)
        .with_context(|| format!("failed to write {:?}", cli.output))?;
    tracing::info!(
        "Wrote {} surfaces with {} bytes of pixel data",
        summary.surfaces,
        summary.payload_bytes
    );

    Ok(())
}

fn create_job(cli: &Cli) -> Result<Job> {
    let is_manifest = cli
        .input
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let mut job = if is_manifest {
        makedds::load_job(&cli.input, cli.output.clone())
            .with_context(|| format!("failed to load manifest {:?}", cli.input))?
    } else {
        Job::single(&cli.input, &cli.output)
    };

    // Flags only enable features for manifests.
    if cli.mipmap {
        job.mipmaps = true;
        job.max_mip_levels = 0;
    }
    if cli.pow2 {
        job.force_pow2 = true;
    }

    Ok(job)
}
