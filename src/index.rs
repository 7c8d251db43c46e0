//! Venue index built from manifest records.
//!
//! The index is keyed by section number. Under each number it records which
//! section types exist, the section identifier of each type, and the row
//! numbers of that section. Suites (sections without rows) live in a
//! separate registry keyed by section number.
//!
//! Construction goes through a single-writer [`VenueIndexBuilder`]. Calling
//! [`VenueIndexBuilder::build`] freezes the result into an immutable
//! [`VenueIndex`] that can be shared across threads for resolution.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::LookupTables;
use crate::token::{row_number, section_number, SectionTypeParser};

/// One line of a venue manifest.
///
/// A record without a row identifier describes a suite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestRecord {
    /// Operator-assigned section identifier.
    pub section_id: String,
    /// Display name of the section, e.g. `"Field Box 132"`.
    pub section_name: String,
    /// Operator-assigned row identifier; absent for suites.
    #[serde(default)]
    pub row_id: Option<String>,
    /// Display name of the row, e.g. `"Row 2A"`; absent for suites.
    #[serde(default)]
    pub row_name: Option<String>,
}

impl ManifestRecord {
    /// Creates a record for a row within a section.
    #[must_use]
    pub fn row(
        section_id: impl Into<String>,
        section_name: impl Into<String>,
        row_id: impl Into<String>,
        row_name: impl Into<String>,
    ) -> Self {
        Self {
            section_id: section_id.into(),
            section_name: section_name.into(),
            row_id: Some(row_id.into()),
            row_name: Some(row_name.into()),
        }
    }

    /// Creates a record for a suite.
    #[must_use]
    pub fn suite(section_id: impl Into<String>, section_name: impl Into<String>) -> Self {
        Self {
            section_id: section_id.into(),
            section_name: section_name.into(),
            row_id: None,
            row_name: None,
        }
    }
}

/// A (section number, section type) combination found in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTypeEntry {
    section_id: String,
    rows: HashMap<String, String>,
}

impl SectionTypeEntry {
    fn new(section_id: &str) -> Self {
        Self {
            section_id: section_id.to_string(),
            rows: HashMap::new(),
        }
    }

    /// Section identifier of this entry.
    #[must_use]
    pub fn section_id(&self) -> &str {
        &self.section_id
    }

    /// Row identifier for a canonical row number.
    #[must_use]
    pub fn row(&self, row_number: &str) -> Option<&str> {
        self.rows.get(row_number).map(String::as_str)
    }

    /// All rows, keyed by canonical row number.
    #[must_use]
    pub fn rows(&self) -> &HashMap<String, String> {
        &self.rows
    }
}

/// What [`VenueIndexBuilder::add_manifest_record`] did with a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    /// Registered (or replaced) a suite.
    Suite {
        /// Extracted section number.
        section_number: String,
    },

    /// Registered a row under a section type.
    ///
    /// `row_number` is `None` when the row name could not be parsed; the
    /// section entry still exists but no row was stored.
    Row {
        /// Extracted section number.
        section_number: String,
        /// Extracted section-type shortname.
        section_type: String,
        /// Extracted row number.
        row_number: Option<String>,
    },

    /// Dropped: the section name carries no usable section number.
    Skipped,
}

/// Size summary of a built index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Distinct section numbers with rows.
    pub section_numbers: usize,
    /// Section-type entries across all section numbers.
    pub section_types: usize,
    /// Stored rows across all entries.
    pub rows: usize,
    /// Registered suites.
    pub suites: usize,
    /// Records dropped for lack of a section number.
    pub skipped_records: usize,
    /// Rowed records whose row name had no usable row number.
    pub unnumbered_rows: usize,
}

type SectionRowMap = HashMap<String, HashMap<String, SectionTypeEntry>>;

/// Single-writer builder for a [`VenueIndex`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use seatmap::{LookupTables, VenueIndexBuilder};
///
/// let mut builder = VenueIndexBuilder::new(Arc::new(LookupTables::default()));
/// builder.add_manifest_record("S1", "Suite 132", None, None);
/// builder.add_manifest_record("FB132", "Field Box 132", Some("R1"), Some("Row 1"));
/// let index = builder.build();
///
/// assert_eq!(index.suite("132"), Some("S1"));
/// assert_eq!(index.entry("132", "fb").unwrap().row("1"), Some("R1"));
/// ```
#[derive(Debug, Clone)]
pub struct VenueIndexBuilder {
    parser: SectionTypeParser,
    section_rows: SectionRowMap,
    suites: HashMap<String, String>,
    skipped_records: usize,
    unnumbered_rows: usize,
}

impl VenueIndexBuilder {
    /// Creates an empty builder using the default lookup chain.
    #[must_use]
    pub fn new(tables: Arc<LookupTables>) -> Self {
        Self::with_parser(SectionTypeParser::new(tables))
    }

    /// Creates an empty builder with a preconfigured section-type parser.
    ///
    /// The same parser is handed on to resolvers built from the index.
    #[must_use]
    pub fn with_parser(parser: SectionTypeParser) -> Self {
        Self {
            parser,
            section_rows: HashMap::new(),
            suites: HashMap::new(),
            skipped_records: 0,
            unnumbered_rows: 0,
        }
    }

    /// Adds one manifest record.
    ///
    /// A missing or empty `row_id` marks a suite. Duplicate suites, section
    /// types and rows overwrite earlier ones (last write wins), except that a
    /// section type keeps the section identifier it was first created with.
    pub fn add_manifest_record(
        &mut self,
        section_id: &str,
        section_name: &str,
        row_id: Option<&str>,
        row_name: Option<&str>,
    ) -> IngestOutcome {
        let Some(number) = section_number(section_name) else {
            debug!(section_id, section_name, "dropping manifest record without a section number");
            self.skipped_records += 1;
            return IngestOutcome::Skipped;
        };

        let Some(row_id) = row_id.filter(|id| !id.is_empty()) else {
            trace!(section_id, section_number = %number, "registering suite");
            self.suites.insert(number.clone(), section_id.to_string());
            return IngestOutcome::Suite {
                section_number: number,
            };
        };

        let section_type = self.parser.from_manifest(section_name);
        let row = row_number(row_name);

        let entry = self
            .section_rows
            .entry(number.clone())
            .or_default()
            .entry(section_type.clone())
            .or_insert_with(|| SectionTypeEntry::new(section_id));

        match &row {
            Some(row) => {
                entry.rows.insert(row.clone(), row_id.to_string());
            }
            None => {
                debug!(
                    section_id,
                    row_id,
                    row_name = row_name.unwrap_or_default(),
                    "manifest row has no usable row number"
                );
                self.unnumbered_rows += 1;
            }
        }

        IngestOutcome::Row {
            section_number: number,
            section_type,
            row_number: row,
        }
    }

    /// Adds one [`ManifestRecord`].
    pub fn add_record(&mut self, record: &ManifestRecord) -> IngestOutcome {
        self.add_manifest_record(
            &record.section_id,
            &record.section_name,
            record.row_id.as_deref(),
            record.row_name.as_deref(),
        )
    }

    /// Freezes the builder into a read-only index.
    #[must_use]
    pub fn build(self) -> VenueIndex {
        let index = VenueIndex {
            parser: self.parser,
            section_rows: self.section_rows,
            suites: self.suites,
            skipped_records: self.skipped_records,
            unnumbered_rows: self.unnumbered_rows,
        };
        debug!(stats = ?index.stats(), "venue index built");
        index
    }
}

impl Extend<ManifestRecord> for VenueIndexBuilder {
    fn extend<I: IntoIterator<Item = ManifestRecord>>(&mut self, records: I) {
        for record in records {
            self.add_record(&record);
        }
    }
}

impl<'a> Extend<&'a ManifestRecord> for VenueIndexBuilder {
    fn extend<I: IntoIterator<Item = &'a ManifestRecord>>(&mut self, records: I) {
        for record in records {
            self.add_record(record);
        }
    }
}

/// Immutable index of a venue's sections, rows and suites.
#[derive(Debug, Clone)]
pub struct VenueIndex {
    parser: SectionTypeParser,
    section_rows: SectionRowMap,
    suites: HashMap<String, String>,
    skipped_records: usize,
    unnumbered_rows: usize,
}

impl VenueIndex {
    /// Starts building an index.
    #[must_use]
    pub fn builder(tables: Arc<LookupTables>) -> VenueIndexBuilder {
        VenueIndexBuilder::new(tables)
    }

    /// Builds an index from records in one pass.
    pub fn from_records<'a>(
        tables: Arc<LookupTables>,
        records: impl IntoIterator<Item = &'a ManifestRecord>,
    ) -> Self {
        let mut builder = Self::builder(tables);
        builder.extend(records);
        builder.build()
    }

    /// Section-type parser the index was built with.
    #[must_use]
    pub fn parser(&self) -> &SectionTypeParser {
        &self.parser
    }

    /// All section-type entries under a section number.
    #[must_use]
    pub fn section_types(&self, section_number: &str) -> Option<&HashMap<String, SectionTypeEntry>> {
        self.section_rows.get(section_number)
    }

    /// The entry for a (section number, section type) pair.
    #[must_use]
    pub fn entry(&self, section_number: &str, section_type: &str) -> Option<&SectionTypeEntry> {
        self.section_types(section_number)?.get(section_type)
    }

    /// Suite section identifier for a section number.
    #[must_use]
    pub fn suite(&self, section_number: &str) -> Option<&str> {
        self.suites.get(section_number).map(String::as_str)
    }

    /// Returns a size summary.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            section_numbers: self.section_rows.len(),
            section_types: self.section_rows.values().map(HashMap::len).sum(),
            rows: self
                .section_rows
                .values()
                .flat_map(HashMap::values)
                .map(|entry| entry.rows.len())
                .sum(),
            suites: self.suites.len(),
            skipped_records: self.skipped_records,
            unnumbered_rows: self.unnumbered_rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> VenueIndexBuilder {
        VenueIndexBuilder::new(Arc::new(LookupTables::default()))
    }

    #[test]
    fn suite_record_goes_to_suite_registry() {
        let mut b = builder();
        let outcome = b.add_manifest_record("S1", "Suite 132", None, None);
        assert_eq!(
            outcome,
            IngestOutcome::Suite {
                section_number: "132".to_string()
            }
        );
        let index = b.build();
        assert_eq!(index.suite("132"), Some("S1"));
        assert!(index.section_types("132").is_none());
    }

    #[test]
    fn empty_row_id_is_a_suite() {
        let mut b = builder();
        b.add_manifest_record("S9", "Suite 9", Some(""), Some(""));
        assert_eq!(b.build().suite("9"), Some("S9"));
    }

    #[test]
    fn whitespace_row_id_is_not_a_suite() {
        let mut b = builder();
        let outcome = b.add_manifest_record("C9", "Club 9", Some(" "), Some("1"));
        assert!(matches!(outcome, IngestOutcome::Row { .. }));
        let index = b.build();
        assert_eq!(index.suite("9"), None);
        assert_eq!(index.entry("9", "c").unwrap().row("1"), Some(" "));
    }

    #[test]
    fn suite_last_write_wins() {
        let mut b = builder();
        b.add_manifest_record("S1", "Suite 5", None, None);
        b.add_manifest_record("S2", "Suite 5", None, None);
        assert_eq!(b.build().suite("5"), Some("S2"));
    }

    #[test]
    fn rows_grouped_by_number_and_type() {
        let mut b = builder();
        let outcome = b.add_manifest_record("FB10", "Field Box 10", Some("r1"), Some("Row 1"));
        assert_eq!(
            outcome,
            IngestOutcome::Row {
                section_number: "10".to_string(),
                section_type: "fb".to_string(),
                row_number: Some("1".to_string()),
            }
        );
        b.add_manifest_record("FB10", "Field Box 10", Some("r2"), Some("Row 2A"));
        b.add_manifest_record("TD10", "Top Deck 10", Some("t1"), Some("1"));
        let index = b.build();

        let types = index.section_types("10").unwrap();
        assert_eq!(types.len(), 2);
        let fb = index.entry("10", "fb").unwrap();
        assert_eq!(fb.section_id(), "FB10");
        assert_eq!(fb.row("1"), Some("r1"));
        assert_eq!(fb.row("2a"), Some("r2"));
        assert_eq!(index.entry("10", "td").unwrap().row("1"), Some("t1"));
    }

    #[test]
    fn duplicate_row_overwrites() {
        let mut b = builder();
        b.add_manifest_record("FB10", "Field Box 10", Some("old"), Some("Row 3"));
        b.add_manifest_record("FB10", "Field Box 10", Some("new"), Some("03"));
        let index = b.build();
        assert_eq!(index.entry("10", "fb").unwrap().row("3"), Some("new"));
        assert_eq!(index.stats().rows, 1);
    }

    #[test]
    fn section_without_number_is_skipped() {
        let mut b = builder();
        assert_eq!(
            b.add_manifest_record("X", "Dugout Club", Some("r"), Some("1")),
            IngestOutcome::Skipped
        );
        assert_eq!(
            b.add_manifest_record("Y", "Section 1 2", None, None),
            IngestOutcome::Skipped
        );
        let stats = b.build().stats();
        assert_eq!(stats.skipped_records, 2);
        assert_eq!(stats.section_numbers, 0);
        assert_eq!(stats.suites, 0);
    }

    #[test]
    fn unparseable_row_name_registers_entry_only() {
        let mut b = builder();
        let outcome = b.add_manifest_record("RS4", "Reserve 4", Some("r"), Some("25 rw"));
        assert!(matches!(outcome, IngestOutcome::Row { row_number: None, .. }));
        b.add_manifest_record("RS4", "Reserve 4", Some("r2"), None);
        let index = b.build();
        let entry = index.entry("4", "rs").unwrap();
        assert!(entry.rows().is_empty());
        assert_eq!(index.stats().unnumbered_rows, 2);
    }

    #[test]
    fn unmapped_manifest_type_kept_verbatim() {
        let mut b = builder();
        b.add_manifest_record("PD1", "Party Deck 1", Some("r"), Some("A"));
        assert!(b.build().entry("1", "party deck").is_some());
    }

    #[test]
    fn number_only_section_uses_placeholder_type() {
        let mut b = builder();
        b.add_manifest_record("N7", "7", Some("r"), Some("B"));
        let index = b.build();
        assert_eq!(
            index.entry("7", crate::token::NO_SECTION_TYPE).unwrap().row("b"),
            Some("r")
        );
    }

    #[test]
    fn suite_and_rows_may_share_a_number() {
        let mut b = builder();
        b.add_manifest_record("S3", "Suite 3", None, None);
        b.add_manifest_record("C3", "Club 3", Some("r"), Some("1"));
        let index = b.build();
        assert_eq!(index.suite("3"), Some("S3"));
        assert_eq!(index.entry("3", "c").unwrap().section_id(), "C3");
    }

    #[test]
    fn extend_with_records_and_stats() {
        let records = vec![
            ManifestRecord::row("FB1", "Field Box 1", "a", "Row 1"),
            ManifestRecord::row("FB1", "Field Box 1", "b", "Row 2"),
            ManifestRecord::row("RS1", "Reserve 1", "c", "Row 1"),
            ManifestRecord::row("RS2", "Reserve 2", "d", "Row 1"),
            ManifestRecord::suite("S1", "Suite 100"),
        ];
        let index = VenueIndex::from_records(Arc::new(LookupTables::default()), &records);
        assert_eq!(
            index.stats(),
            IndexStats {
                section_numbers: 2,
                section_types: 3,
                rows: 4,
                suites: 1,
                skipped_records: 0,
                unnumbered_rows: 0,
            }
        );
    }

    #[test]
    fn manifest_record_deserializes_with_missing_rows() {
        let record: ManifestRecord =
            serde_json::from_str(r#"{"section_id": "S1", "section_name": "Suite 1"}"#).unwrap();
        assert_eq!(record, ManifestRecord::suite("S1", "Suite 1"));
    }
}
