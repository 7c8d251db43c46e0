//! Resolution of free-form (section, row) text against a [`VenueIndex`].
//!
//! Resolution is a single pass with two branches:
//!
//! - **suite**: the row text is empty, or the section text mentions
//!   "suite". Only the suite registry is consulted.
//! - **row seat**: the section number selects the candidate section types,
//!   then the section type is matched exactly, or inferred when the number
//!   has only one type in the whole venue. The row number selects the row.
//!
//! Nothing here fails. Unresolvable input comes back as a [`Resolution`]
//! with `valid == false` and a [`ResolutionFailure`] naming the cause.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::index::{SectionTypeEntry, VenueIndex};
use crate::token::{row_number, section_number};

const SUITE_WORD: &str = "suite";

/// Why an input could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionFailure {
    /// The section text has no number, or more than one.
    UnparseableSectionNumber,

    /// No rowed section carries this number.
    UnknownSectionNumber,

    /// No suite carries this number.
    UnknownSuite,

    /// Several section types share the number and none matched the input.
    AmbiguousSectionType,

    /// The row text has no single row designator.
    UnparseableRowNumber,

    /// The section resolved but has no such row.
    UnknownRowNumber,

    /// The section text names a suite but row text was supplied.
    SuiteWithRow,
}

impl fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UnparseableSectionNumber => "unparseable section number",
            Self::UnknownSectionNumber => "unknown section number",
            Self::UnknownSuite => "unknown suite",
            Self::AmbiguousSectionType => "ambiguous section type",
            Self::UnparseableRowNumber => "unparseable row number",
            Self::UnknownRowNumber => "unknown row number",
            Self::SuiteWithRow => "suite with row",
        };
        f.write_str(s)
    }
}

/// Outcome of resolving one (section, row) input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Resolved section identifier, if one could be determined.
    pub section_id: Option<String>,
    /// Resolved row identifier; always absent for suites.
    pub row_id: Option<String>,
    /// True only if the input was completely and unambiguously resolved.
    pub valid: bool,
    /// Cause of an invalid resolution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<ResolutionFailure>,
}

impl Resolution {
    fn resolved(section_id: &str, row_id: Option<&str>) -> Self {
        Self {
            section_id: Some(section_id.to_string()),
            row_id: row_id.map(str::to_string),
            valid: true,
            failure: None,
        }
    }

    fn invalid(section_id: Option<&str>, failure: ResolutionFailure) -> Self {
        Self {
            section_id: section_id.map(str::to_string),
            row_id: None,
            valid: false,
            failure: Some(failure),
        }
    }

    /// `"true"` or `"false"`, for tabular output.
    #[must_use]
    pub const fn validity_str(&self) -> &'static str {
        if self.valid {
            "true"
        } else {
            "false"
        }
    }
}

/// A raw (section, row) input pair.
///
/// An absent row is treated exactly like an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInput {
    /// Free-form section text, e.g. `"FD132"`.
    pub section: String,
    /// Free-form row text, e.g. `"Row 2A"`.
    #[serde(default)]
    pub row: Option<String>,
}

impl SeatInput {
    /// Creates an input pair.
    #[must_use]
    pub fn new(section: impl Into<String>, row: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            row: Some(row.into()),
        }
    }
}

/// Returns true if the input denotes a suite rather than a row seat.
///
/// Only the raw text is inspected: an empty row, or "suite" anywhere in the
/// section text (any case).
#[must_use]
pub fn is_suite(section: &str, row: &str) -> bool {
    row.is_empty() || section.to_lowercase().contains(SUITE_WORD)
}

/// Resolves seat text against a shared, immutable [`VenueIndex`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use seatmap::{LookupTables, ManifestRecord, Resolver, VenueIndex};
///
/// let records = [
///     ManifestRecord::row("FB132", "Field Box 132", "R7", "Row 7"),
///     ManifestRecord::suite("S12", "Suite 12"),
/// ];
/// let index = VenueIndex::from_records(Arc::new(LookupTables::default()), &records);
/// let resolver = Resolver::new(Arc::new(index));
///
/// let seat = resolver.resolve("FD132", "7");
/// assert!(seat.valid);
/// assert_eq!(seat.row_id.as_deref(), Some("R7"));
///
/// let suite = resolver.resolve("Suite 12", "");
/// assert_eq!(suite.section_id.as_deref(), Some("S12"));
/// ```
#[derive(Debug, Clone)]
pub struct Resolver {
    index: Arc<VenueIndex>,
}

impl Resolver {
    /// Creates a resolver over a built index.
    #[must_use]
    pub fn new(index: Arc<VenueIndex>) -> Self {
        Self { index }
    }

    /// Resolves one (section, row) text pair. An empty row means "no row".
    #[must_use]
    pub fn resolve(&self, section: &str, row: &str) -> Resolution {
        let resolution = if is_suite(section, row) {
            self.resolve_suite(section, row)
        } else {
            self.resolve_row(section, row)
        };
        trace!(
            section,
            row,
            valid = resolution.valid,
            failure = ?resolution.failure,
            "resolved seat"
        );
        resolution
    }

    /// Resolves a [`SeatInput`]; an absent row is treated as empty.
    #[must_use]
    pub fn resolve_input(&self, input: &SeatInput) -> Resolution {
        self.resolve(&input.section, input.row.as_deref().unwrap_or_default())
    }

    /// Resolves inputs in order.
    pub fn resolve_all<'a, I>(&'a self, inputs: I) -> impl Iterator<Item = Resolution> + 'a
    where
        I: IntoIterator<Item = &'a SeatInput>,
        I::IntoIter: 'a,
    {
        inputs.into_iter().map(|input| self.resolve_input(input))
    }

    fn resolve_suite(&self, section: &str, row: &str) -> Resolution {
        let Some(number) = section_number(section) else {
            return Resolution::invalid(None, ResolutionFailure::UnparseableSectionNumber);
        };
        let section_id = self.index.suite(&number);

        match section_id {
            Some(id) if row.is_empty() => Resolution::resolved(id, None),
            Some(id) => Resolution::invalid(Some(id), ResolutionFailure::SuiteWithRow),
            None if row.is_empty() => Resolution::invalid(None, ResolutionFailure::UnknownSuite),
            None => Resolution::invalid(None, ResolutionFailure::SuiteWithRow),
        }
    }

    fn resolve_row(&self, section: &str, row: &str) -> Resolution {
        let Some(number) = section_number(section) else {
            return Resolution::invalid(None, ResolutionFailure::UnparseableSectionNumber);
        };
        let Some(types) = self.index.section_types(&number) else {
            return Resolution::invalid(None, ResolutionFailure::UnknownSectionNumber);
        };

        let section_type = self.index.parser().from_input(section);
        let entry: Option<&SectionTypeEntry> = types.get(&section_type).or_else(|| {
            // A number with a single type anywhere in the venue identifies the
            // section on its own.
            if types.len() == 1 {
                types.values().next()
            } else {
                None
            }
        });
        let Some(entry) = entry else {
            return Resolution::invalid(None, ResolutionFailure::AmbiguousSectionType);
        };

        let section_id = Some(entry.section_id());
        let Some(row_number) = row_number(Some(row)) else {
            return Resolution::invalid(section_id, ResolutionFailure::UnparseableRowNumber);
        };
        match entry.row(&row_number) {
            Some(row_id) => Resolution::resolved(entry.section_id(), Some(row_id)),
            None => Resolution::invalid(section_id, ResolutionFailure::UnknownRowNumber),
        }
    }
}
