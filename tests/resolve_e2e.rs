use std::sync::Arc;
use std::thread;

use seatmap::{
    LookupTables, ManifestRecord, Resolution, ResolutionFailure, Resolver, SeatInput,
    SectionTypeParser, VenueIndex,
};

fn ballpark() -> Resolver {
    let records = vec![
        ManifestRecord::suite("S1", "Suite 132"),
        ManifestRecord::suite("S12", "Suite 12"),
        ManifestRecord::row("FB132", "Field Box 132", "FB132-1", "Row 1"),
        ManifestRecord::row("FB132", "Field Box 132", "FB132-2A", "Row 2A"),
        ManifestRecord::row("RS431", "Reserve 431", "R5", "Row 5"),
        ManifestRecord::row("RS431", "Reserve 431", "R6", "Row 6"),
        ManifestRecord::row("FB10", "Field Box 10", "FB10-A", "A"),
        ManifestRecord::row("DC10", "Dugout Club 10", "DC10-A", "A"),
        // Malformed: no section number, dropped during ingestion.
        ManifestRecord::row("X", "Stadium Club", "X-1", "1"),
    ];
    let index = VenueIndex::from_records(Arc::new(LookupTables::default()), &records);
    Resolver::new(Arc::new(index))
}

#[test]
fn suite_round_trip() {
    let resolver = ballpark();

    let ok = resolver.resolve("Suite 132", "");
    assert_eq!(ok.section_id.as_deref(), Some("S1"));
    assert_eq!(ok.row_id, None);
    assert!(ok.valid);

    let with_row = resolver.resolve("Suite 132", "12");
    assert_eq!(with_row.row_id, None);
    assert!(!with_row.valid);
}

#[test]
fn unknown_suite_without_row_never_defaults() {
    let r = ballpark().resolve("Suite 404", "");
    assert_eq!(r.section_id, None);
    assert_eq!(r.row_id, None);
    assert!(!r.valid);
    assert_eq!(r.failure, Some(ResolutionFailure::UnknownSuite));
}

#[test]
fn unknown_suite_with_row_has_no_section() {
    let r = ballpark().resolve("Suite 999", "5");
    assert_eq!(r.section_id, None);
    assert_eq!(r.row_id, None);
    assert!(!r.valid);
    assert_eq!(r.failure, Some(ResolutionFailure::SuiteWithRow));
}

#[test]
fn unique_type_inference() {
    let resolver = ballpark();
    for section in ["all you can eat reserve 431", "anything 431", "RS 431"] {
        let r = resolver.resolve(section, "5");
        assert_eq!(r.section_id.as_deref(), Some("RS431"));
        assert_eq!(r.row_id.as_deref(), Some("R5"));
        assert!(r.valid);
    }
}

#[test]
fn ambiguity_rejection() {
    let r = ballpark().resolve("Mystery Seats 10", "A");
    assert_eq!(r.section_id, None);
    assert_eq!(r.row_id, None);
    assert!(!r.valid);
    assert_eq!(r.failure, Some(ResolutionFailure::AmbiguousSectionType));
}

#[test]
fn known_inputs_disambiguate_shared_numbers() {
    let resolver = ballpark();
    let fd = resolver.resolve("FD10", "a");
    assert_eq!(fd.row_id.as_deref(), Some("FB10-A"));
    let dg = resolver.resolve("DG 10", "Row A");
    assert_eq!(dg.row_id.as_deref(), Some("DC10-A"));
    let dugout = resolver.resolve("dugout club 10", "A");
    assert_eq!(dugout.row_id.as_deref(), Some("DC10-A"));
}

#[test]
fn known_custom_input_matches_manifest_type() {
    let parser = SectionTypeParser::new(Arc::new(LookupTables::default()));
    assert_eq!(parser.from_input("FD132"), parser.from_manifest("Field Box 132"));

    let r = ballpark().resolve("FD132", "Row 2a");
    assert_eq!(r.row_id.as_deref(), Some("FB132-2A"));
    assert!(r.valid);
}

#[test]
fn failure_taxonomy_is_distinguishable() {
    let resolver = ballpark();
    let cases = [
        (("Section 123 143", "1"), ResolutionFailure::UnparseableSectionNumber),
        (("Field Box 999", "1"), ResolutionFailure::UnknownSectionNumber),
        (("Stadium Club", "1"), ResolutionFailure::UnparseableSectionNumber),
        (("Suite 77", ""), ResolutionFailure::UnknownSuite),
        (("Box 10", "A"), ResolutionFailure::AmbiguousSectionType),
        (("Reserve 431", "25 rw"), ResolutionFailure::UnparseableRowNumber),
        (("Reserve 431", "99"), ResolutionFailure::UnknownRowNumber),
        (("Suite 12", "3"), ResolutionFailure::SuiteWithRow),
        (("Suite 999", "5"), ResolutionFailure::SuiteWithRow),
    ];
    for ((section, row), expected) in cases {
        let r = resolver.resolve(section, row);
        assert!(!r.valid, "{section} / {row}");
        assert_eq!(r.failure, Some(expected), "{section} / {row}");
    }
}

#[test]
fn row_numbers_are_canonicalized() {
    let resolver = ballpark();
    assert_eq!(resolver.resolve("Reserve 431", "ROW 05").row_id.as_deref(), Some("R5"));
    assert_eq!(resolver.resolve("Reserve 0431", "6").row_id.as_deref(), Some("R6"));
}

#[test]
fn resolution_is_idempotent() {
    let resolver = ballpark();
    let inputs = [
        ("FD132", "1"),
        ("Suite 132", ""),
        ("Mystery 10", "A"),
        ("anything 431", "6"),
    ];
    for (section, row) in inputs {
        assert_eq!(resolver.resolve(section, row), resolver.resolve(section, row));
    }
}

#[test]
fn concurrent_reads_share_one_index() {
    let resolver = ballpark();
    let expected = resolver.resolve("FD132", "2A");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let resolver = resolver.clone();
            thread::spawn(move || {
                (0..100)
                    .map(|_| resolver.resolve("FD132", "2A"))
                    .collect::<Vec<Resolution>>()
            })
        })
        .collect();

    for handle in handles {
        for r in handle.join().unwrap() {
            assert_eq!(r, expected);
        }
    }
}

#[test]
fn batch_matches_single_calls() {
    let resolver = ballpark();
    let inputs = vec![
        SeatInput::new("FD132", "1"),
        SeatInput {
            section: "Suite 12".to_string(),
            row: None,
        },
        SeatInput::new("Box 10", "A"),
    ];
    let batch: Vec<Resolution> = resolver.resolve_all(&inputs).collect();
    let single: Vec<Resolution> = inputs.iter().map(|i| resolver.resolve_input(i)).collect();
    assert_eq!(batch, single);
    assert_eq!(batch.iter().filter(|r| r.valid).count(), 2);
}
