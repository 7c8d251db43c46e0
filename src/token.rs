//! Token extraction from raw section and row text.
//!
//! A section string such as `"Field Box 132"` or `"FD132"` is decomposed
//! into a *section number* (`"132"`) and a *section type* shortname
//! (`"fb"`). A row string such as `"Row 2A"` yields a *row number* (`"2a"`).
//!
//! Section numbers and row numbers are pure functions of their input.
//! Section types depend on the [`LookupTables`], so they are extracted
//! through a [`SectionTypeParser`] that owns a shared handle to them.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LookupTables;

/// Placeholder section type for a section name that has no type words.
pub const NO_SECTION_TYPE: &str = "no_section_type";

const ROW_WORD: &str = "row";

static NOT_LETTER_OR_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z \t\n\x0C\r]").expect("static regex is valid"));

/// Canonical decimal form of `token` if it is an integer.
///
/// Accepts an optional sign followed by ASCII digits, with no width limit.
/// Leading zeros are stripped and negative zero becomes `"0"`.
///
/// ```
/// use seatmap::token::canonical_integer;
///
/// assert_eq!(canonical_integer("007").as_deref(), Some("7"));
/// assert_eq!(canonical_integer("-12").as_deref(), Some("-12"));
/// assert_eq!(canonical_integer("2A"), None);
/// ```
#[must_use]
pub fn canonical_integer(token: &str) -> Option<String> {
    let (negative, digits) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        return Some("0".to_string());
    }
    Some(if negative {
        format!("-{trimmed}")
    } else {
        trimmed.to_string()
    })
}

fn is_integer(token: &str) -> bool {
    canonical_integer(token).is_some()
}

/// Extracts the section number from a section name.
///
/// Everything but the digits is discarded. Exactly one run of digits must
/// remain; `"Section 123 143"` names two numbers and cannot be resolved.
///
/// ```
/// use seatmap::token::section_number;
///
/// assert_eq!(section_number("FD132").as_deref(), Some("132"));
/// assert_eq!(section_number("Section 123 143"), None);
/// assert_eq!(section_number("Club"), None);
/// ```
#[must_use]
pub fn section_number(text: &str) -> Option<String> {
    let mut runs = text
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty());
    let first = runs.next()?;
    if runs.next().is_some() {
        return None;
    }
    canonical_integer(first)
}

/// Extracts the row number from a row name.
///
/// The word `row` (any case) is dropped. Exactly one token must remain; it
/// is lowercased, and integer tokens are canonicalized (`"05"` -> `"5"`).
/// Anything else is ambiguous: `"25 rw"` could mean row 25 or row "rw".
///
/// ```
/// use seatmap::token::row_number;
///
/// assert_eq!(row_number(Some("Row 2A")).as_deref(), Some("2a"));
/// assert_eq!(row_number(Some("row 05")).as_deref(), Some("5"));
/// assert_eq!(row_number(Some("25 rw")), None);
/// assert_eq!(row_number(None), None);
/// ```
#[must_use]
pub fn row_number(text: Option<&str>) -> Option<String> {
    let mut tokens = text?
        .split_ascii_whitespace()
        .filter(|token| !token.eq_ignore_ascii_case(ROW_WORD));
    let token = tokens.next()?;
    if tokens.next().is_some() {
        return None;
    }

    let token = token.to_lowercase();
    Some(canonical_integer(&token).unwrap_or(token))
}

/// One way of turning a section-type phrase into a shortname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStrategy {
    /// The phrase is a manifest section-type name (`"field box"`).
    SectionTypeName,

    /// The phrase already is a shortname (`"fb"`).
    Shortname,

    /// The phrase is a human-verified custom input (`"fd"`).
    KnownInput,
}

impl LookupStrategy {
    /// Applies this strategy to a lowercase candidate phrase.
    #[must_use]
    pub fn apply<'t>(self, tables: &'t LookupTables, candidate: &str) -> Option<&'t str> {
        match self {
            Self::SectionTypeName => tables.section_type(candidate),
            Self::Shortname => tables.shortname(candidate),
            Self::KnownInput => tables.known_input(candidate),
        }
    }
}

/// Ordered chain of [`LookupStrategy`] values; the first match wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortnameLookup(Vec<LookupStrategy>);

impl ShortnameLookup {
    /// Builds a chain evaluated in the given order.
    #[must_use]
    pub fn new(strategies: Vec<LookupStrategy>) -> Self {
        Self(strategies)
    }

    /// Returns the strategies in evaluation order.
    #[must_use]
    pub fn strategies(&self) -> &[LookupStrategy] {
        &self.0
    }

    /// Runs the chain against `candidate`.
    #[must_use]
    pub fn lookup<'t>(&self, tables: &'t LookupTables, candidate: &str) -> Option<&'t str> {
        self.0
            .iter()
            .find_map(|strategy| strategy.apply(tables, candidate))
    }
}

impl Default for ShortnameLookup {
    /// Section-type names, then shortnames themselves, then known inputs.
    fn default() -> Self {
        Self(vec![
            LookupStrategy::SectionTypeName,
            LookupStrategy::Shortname,
            LookupStrategy::KnownInput,
        ])
    }
}

/// Extracts section-type shortnames using a shared set of lookup tables.
#[derive(Debug, Clone)]
pub struct SectionTypeParser {
    tables: Arc<LookupTables>,
    lookup: ShortnameLookup,
}

impl SectionTypeParser {
    /// Creates a parser with the default lookup chain.
    #[must_use]
    pub fn new(tables: Arc<LookupTables>) -> Self {
        Self::with_lookup(tables, ShortnameLookup::default())
    }

    /// Creates a parser with a custom lookup chain.
    #[must_use]
    pub fn with_lookup(tables: Arc<LookupTables>, lookup: ShortnameLookup) -> Self {
        Self { tables, lookup }
    }

    /// Canonicalizes a section-type phrase, or `None` if nothing matches.
    #[must_use]
    pub fn shortname(&self, candidate: &str) -> Option<&str> {
        self.lookup.lookup(&self.tables, candidate)
    }

    /// Section type of a trusted manifest section name.
    ///
    /// Integer tokens are dropped and the rest is looked up in the
    /// section-type table only. Unmapped types pass through verbatim.
    #[must_use]
    pub fn from_manifest(&self, section_name: &str) -> String {
        let phrase = section_name
            .split_ascii_whitespace()
            .filter(|token| !is_integer(token))
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if phrase.is_empty() {
            return NO_SECTION_TYPE.to_string();
        }

        match self.tables.section_type(&phrase) {
            Some(shortname) => shortname.to_string(),
            None => {
                debug!(section_type = %phrase, "manifest section type missing from lookup tables");
                phrase
            }
        }
    }

    /// Section type of user-supplied section text.
    ///
    /// Everything but letters and whitespace is stripped. The whole phrase is
    /// tried first, then each word left to right
    /// (`"all you can eat reserve"` -> `"rs"`). If nothing matches, the
    /// cleaned phrase is returned as is.
    #[must_use]
    pub fn from_input(&self, section_text: &str) -> String {
        let cleaned = NOT_LETTER_OR_SPACE.replace_all(section_text, "");
        let phrase = cleaned
            .split_ascii_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if phrase.is_empty() {
            return NO_SECTION_TYPE.to_string();
        }

        std::iter::once(phrase.as_str())
            .chain(phrase.split(' '))
            .find_map(|candidate| self.shortname(candidate))
            .map_or_else(|| phrase.clone(), str::to_string)
    }
}
