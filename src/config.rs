//! Lookup table configuration.
//!
//! Two human-curated tables drive section-type canonicalization:
//!
//! - **section types**: every section-type name seen in manifests, mapped to
//!   its shortname (`"field box" -> "fb"`).
//! - **known inputs**: custom spellings observed in real ticket input and
//!   verified by a person, mapped to a shortname (`"fd" -> "fb"`).
//!
//! Both are lowercase-keyed. Tables are immutable once built and are shared
//! between the index builder and the resolver through an `Arc`.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const SECTION_TYPES: &[(&str, &str)] = &[
    ("top deck", "td"),
    ("baseline club", "bc"),
    ("loge box", "lb"),
    ("club", "c"),
    ("field box", "fb"),
    ("right field pavilion", "rfp"),
    ("reserve", "rs"),
    ("left field pavilion", "lfp"),
    ("dugout club", "dc"),
    ("stadium club", "sc"),
];

const KNOWN_INPUTS: &[(&str, &str)] = &[
    ("fd", "fb"),
    ("pb", "fb"),
    ("dg", "dc"),
    ("ifb", "fb"),
    ("bl", "bc"),
    ("infield box", "fb"),
    ("field", "fb"),
    ("top", "td"),
    ("infield box vip", "fb"),
    ("infield box value", "fb"),
    ("infield box value vip", "fb"),
];

/// Serialized form of [`LookupTables`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawTables {
    #[serde(default)]
    section_types: BTreeMap<String, String>,
    #[serde(default)]
    known_inputs: BTreeMap<String, String>,
}

/// Validated section-type vocabulary.
///
/// # Examples
///
/// ```
/// use seatmap::LookupTables;
///
/// let tables = LookupTables::default();
/// assert_eq!(tables.section_type("field box"), Some("fb"));
/// assert_eq!(tables.shortname("fb"), Some("fb"));
/// assert_eq!(tables.known_input("fd"), Some("fb"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "RawTables")]
pub struct LookupTables {
    section_types: BTreeMap<String, String>,
    known_inputs: BTreeMap<String, String>,
    shortnames: HashSet<String>,
}

impl LookupTables {
    /// Builds validated tables.
    ///
    /// # Errors
    /// - [`ConfigError::EmptyEntry`] if any key or shortname is empty.
    /// - [`ConfigError::NotLowercase`] if any key or shortname has uppercase letters.
    /// - [`ConfigError::UnknownShortname`] if a known input maps to a shortname
    ///   that no section type produces.
    pub fn new(
        section_types: BTreeMap<String, String>,
        known_inputs: BTreeMap<String, String>,
    ) -> Result<Self, ConfigError> {
        check_table("section_types", &section_types)?;
        check_table("known_inputs", &known_inputs)?;

        let shortnames: HashSet<String> = section_types.values().cloned().collect();
        for (input, shortname) in &known_inputs {
            if !shortnames.contains(shortname) {
                return Err(ConfigError::UnknownShortname {
                    input: input.clone(),
                    shortname: shortname.clone(),
                });
            }
        }

        Ok(Self {
            section_types,
            known_inputs,
            shortnames,
        })
    }

    /// Parses and validates tables from JSON.
    ///
    /// The expected shape is
    /// `{"section_types": {"field box": "fb"}, "known_inputs": {"fd": "fb"}}`.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed JSON, or any validation
    /// error from [`LookupTables::new`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: RawTables = serde_json::from_str(json).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        Self::new(raw.section_types, raw.known_inputs)
    }

    /// Reads tables from a JSON file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`LookupTables::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Shortname for a manifest section-type name.
    #[must_use]
    pub fn section_type(&self, name: &str) -> Option<&str> {
        self.section_types.get(name).map(String::as_str)
    }

    /// Shortname for a previously verified custom input.
    #[must_use]
    pub fn known_input(&self, input: &str) -> Option<&str> {
        self.known_inputs.get(input).map(String::as_str)
    }

    /// Returns the stored shortname if `candidate` is itself a shortname.
    #[must_use]
    pub fn shortname(&self, candidate: &str) -> Option<&str> {
        self.shortnames.get(candidate).map(String::as_str)
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        let section_types: BTreeMap<String, String> = SECTION_TYPES
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let known_inputs: BTreeMap<String, String> = KNOWN_INPUTS
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let shortnames = section_types.values().cloned().collect();
        Self {
            section_types,
            known_inputs,
            shortnames,
        }
    }
}

impl From<LookupTables> for RawTables {
    fn from(tables: LookupTables) -> Self {
        Self {
            section_types: tables.section_types,
            known_inputs: tables.known_inputs,
        }
    }
}

impl<'de> Deserialize<'de> for LookupTables {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawTables::deserialize(deserializer)?;
        LookupTables::new(raw.section_types, raw.known_inputs).map_err(serde::de::Error::custom)
    }
}

fn check_table(table: &'static str, entries: &BTreeMap<String, String>) -> Result<(), ConfigError> {
    for (key, value) in entries {
        for entry in [key, value] {
            if entry.trim().is_empty() {
                return Err(ConfigError::EmptyEntry { table });
            }
            if entry.chars().any(char::is_uppercase) {
                return Err(ConfigError::NotLowercase {
                    table,
                    entry: entry.clone(),
                });
            }
        }
    }
    Ok(())
}
