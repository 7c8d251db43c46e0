//! # seatmap - Venue seat normalization
//!
//! seatmap resolves free-form ticket seating text ("FD132", "Reserve 431",
//! "Suite 12") into the canonical section and row identifiers of a venue
//! manifest. Resolution is deterministic and never guesses: an input that
//! cannot be matched safely is reported as invalid, with the cause.
//!
//! ## Core Concepts
//!
//! - **Section number**: the single number in a section name
//! - **Section type**: a shortname for a seating category (`"fb"` for field box)
//! - **Suite**: a section without rows, identified by number alone
//! - **Resolution**: the resolved identifiers plus a validity flag
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use seatmap::{LookupTables, ManifestRecord, Resolver, VenueIndex};
//!
//! let tables = Arc::new(LookupTables::default());
//! let records = [
//!     ManifestRecord::row("RS431", "Reserve 431", "R5", "Row 5"),
//!     ManifestRecord::suite("S12", "Suite 12"),
//! ];
//! let index = VenueIndex::from_records(tables, &records);
//! let resolver = Resolver::new(Arc::new(index));
//!
//! let seat = resolver.resolve("all you can eat reserve 431", "5");
//! assert!(seat.valid);
//! assert_eq!(seat.row_id.as_deref(), Some("R5"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod index;
pub mod manifest;
pub mod resolve;
pub mod token;

// Re-export primary types at crate root for convenience
pub use config::LookupTables;
pub use error::{ConfigError, ManifestError, SeatmapError, SeatmapResult};
pub use index::{IndexStats, IngestOutcome, ManifestRecord, SectionTypeEntry, VenueIndex, VenueIndexBuilder};
pub use manifest::{normalize_csv, read_manifest, read_manifest_path, read_seat_inputs, write_resolutions};
pub use resolve::{is_suite, Resolution, ResolutionFailure, Resolver, SeatInput};
pub use token::{LookupStrategy, SectionTypeParser, ShortnameLookup, NO_SECTION_TYPE};
