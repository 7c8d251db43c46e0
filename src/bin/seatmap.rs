//! seatmap CLI
//!
//! Builds a venue index from a manifest CSV and normalizes a CSV of
//! `section,row` inputs, writing the results to stdout.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use seatmap::{
    normalize_csv, read_manifest_path, LookupTables, ManifestError, Resolver, SeatmapResult,
    VenueIndexBuilder,
};

/// Resolve free-form venue seating text against a manifest
#[derive(Debug, Parser)]
#[command(name = "seatmap", version)]
struct Args {
    /// Manifest CSV (section_id,section_name,row_id,row_name)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Input CSV (section,row); reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Lookup tables JSON; built-in ballpark tables when omitted
    #[arg(short, long)]
    tables: Option<PathBuf>,
}

fn run(args: &Args) -> SeatmapResult<()> {
    let tables = match &args.tables {
        Some(path) => LookupTables::from_json_file(path)?,
        None => LookupTables::default(),
    };

    let mut builder = VenueIndexBuilder::new(Arc::new(tables));
    read_manifest_path(&args.manifest, &mut builder)?;
    let index = builder.build();
    info!(stats = ?index.stats(), "venue index ready");

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(File::open(path).map_err(|source| ManifestError::Io {
            path: path.clone(),
            source,
        })?),
        None => Box::new(io::stdin().lock()),
    };

    let resolver = Resolver::new(Arc::new(index));
    let (total, valid) = normalize_csv(&resolver, input, io::stdout().lock())?;
    info!(total, valid, invalid = total - valid, "normalized inputs");
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "seatmap failed");
            ExitCode::FAILURE
        }
    }
}
