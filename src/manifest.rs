//! CSV ingestion and batch output.
//!
//! Manifests are headered CSV files with the columns `section_id`,
//! `section_name`, `row_id` and `row_name`. Empty cells are absent values;
//! a record with no `row_id` is a suite. Additional columns are ignored.
//!
//! Batch inputs are headered CSV files with `section` and `row` columns.
//! Results are written back as `section,row,section_id,row_id,valid`.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::ManifestError;
use crate::index::{IngestOutcome, ManifestRecord, VenueIndexBuilder};
use crate::resolve::{Resolution, Resolver, SeatInput};

const MANIFEST_COLUMNS: [&str; 4] = ["section_id", "section_name", "row_id", "row_name"];
const INPUT_COLUMNS: [&str; 2] = ["section", "row"];
const OUTPUT_COLUMNS: [&str; 5] = ["section", "row", "section_id", "row_id", "valid"];

fn record_error(err: csv::Error) -> ManifestError {
    match err.position() {
        Some(pos) => ManifestError::Record {
            line: pos.line(),
            message: err.to_string(),
        },
        None => ManifestError::Csv(err),
    }
}

fn require_columns<R: Read>(
    reader: &mut csv::Reader<R>,
    columns: &[&'static str],
) -> Result<(), ManifestError> {
    let headers = reader.headers().map_err(record_error)?;
    for &column in columns {
        if !headers.iter().any(|h| h == column) {
            return Err(ManifestError::MissingColumn { column });
        }
    }
    Ok(())
}

fn open(path: &Path) -> Result<File, ManifestError> {
    File::open(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Feeds every record of a manifest CSV into `builder`.
///
/// Returns the number of records read, including ones the builder skipped.
///
/// # Errors
/// - [`ManifestError::MissingColumn`] if a required column is absent.
/// - [`ManifestError::Record`] if a record cannot be decoded.
pub fn read_manifest<R: Read>(
    reader: R,
    builder: &mut VenueIndexBuilder,
) -> Result<usize, ManifestError> {
    let mut reader = csv::Reader::from_reader(reader);
    require_columns(&mut reader, &MANIFEST_COLUMNS)?;

    let mut count = 0usize;
    let mut skipped = 0usize;
    for record in reader.deserialize::<ManifestRecord>() {
        let record = record.map_err(record_error)?;
        if builder.add_record(&record) == IngestOutcome::Skipped {
            skipped += 1;
        }
        count += 1;
    }

    debug!(records = count, skipped, "manifest read");
    Ok(count)
}

/// Reads a manifest CSV file into `builder`.
///
/// # Errors
/// Returns [`ManifestError::Io`] if the file cannot be opened, otherwise as
/// [`read_manifest`].
pub fn read_manifest_path(
    path: impl AsRef<Path>,
    builder: &mut VenueIndexBuilder,
) -> Result<usize, ManifestError> {
    let path = path.as_ref();
    let count = read_manifest(open(path)?, builder)?;
    info!(path = %path.display(), records = count, "loaded manifest");
    Ok(count)
}

/// Reads batch inputs from a `section,row` CSV.
///
/// # Errors
/// - [`ManifestError::MissingColumn`] if a required column is absent.
/// - [`ManifestError::Record`] if a record cannot be decoded.
pub fn read_seat_inputs<R: Read>(reader: R) -> Result<Vec<SeatInput>, ManifestError> {
    let mut reader = csv::Reader::from_reader(reader);
    require_columns(&mut reader, &INPUT_COLUMNS)?;

    reader
        .deserialize::<SeatInput>()
        .map(|record| record.map_err(record_error))
        .collect()
}

/// Writes inputs alongside their resolutions.
///
/// # Errors
/// Returns [`ManifestError::Csv`] if writing fails.
pub fn write_resolutions<'a, W: Write>(
    writer: W,
    rows: impl IntoIterator<Item = (&'a SeatInput, &'a Resolution)>,
) -> Result<(), ManifestError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(OUTPUT_COLUMNS)?;
    for (input, resolution) in rows {
        writer.write_record([
            input.section.as_str(),
            input.row.as_deref().unwrap_or_default(),
            resolution.section_id.as_deref().unwrap_or_default(),
            resolution.row_id.as_deref().unwrap_or_default(),
            resolution.validity_str(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Resolves every input of a `section,row` CSV and writes the results.
///
/// Returns `(total, valid)` counts.
///
/// # Errors
/// As [`read_seat_inputs`] and [`write_resolutions`].
pub fn normalize_csv<R: Read, W: Write>(
    resolver: &Resolver,
    input: R,
    output: W,
) -> Result<(usize, usize), ManifestError> {
    let inputs = read_seat_inputs(input)?;
    let resolutions: Vec<Resolution> = resolver.resolve_all(&inputs).collect();
    let valid = resolutions.iter().filter(|r| r.valid).count();
    write_resolutions(output, inputs.iter().zip(&resolutions))?;
    Ok((inputs.len(), valid))
}
