//! The reference dictionary: name → replacement.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! Names include the leading '&' and may lack the trailing ';' (the legacy
//! forms). The canonical source is the WHATWG `entities.json` file, a copy of
//! which is embedded in this crate.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::replacement::Replacement;

/// The WHATWG `entities.json` table (2231 names).
pub const WHATWG_ENTITIES_JSON: &str = include_str!("../data/entities.json");

/// One record of `entities.json`.
///
/// ```json
/// "&notin;": { "codepoints": [8713], "characters": "∉" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// The code points the reference stands for. Authoritative.
    pub codepoints: Vec<u32>,
    /// The same code points as a string. Must agree with `codepoints`.
    pub characters: String,
}

/// Immutable mapping from reference name to replacement, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceDictionary {
    entries: BTreeMap<String, Replacement>,
}

impl ReferenceDictionary {
    /// Collect a dictionary from `(name, replacement)` pairs.
    ///
    /// Repeating a name with the same replacement is allowed; names are not
    /// validated here but when the automaton is built.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::ConflictingReplacement`] if a name appears twice
    /// with different replacements.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = (S, Replacement)>,
        S: Into<String>,
    {
        let mut map = BTreeMap::new();
        for (name, replacement) in entries {
            match map.entry(name.into()) {
                Entry::Vacant(slot) => {
                    let _ = slot.insert(replacement);
                }
                Entry::Occupied(slot) => {
                    if *slot.get() != replacement {
                        return Err(BuildError::ConflictingReplacement {
                            name: slot.key().clone(),
                        });
                    }
                }
            }
        }
        Ok(Self { entries: map })
    }

    /// Parse a dictionary in the `entities.json` format.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::MalformedDictionary`] if the JSON does not have
    /// the expected shape, and the [`Replacement::from_codepoints`] errors or
    /// [`BuildError::InconsistentReplacement`] for a bad record.
    pub fn from_json_str(json: &str) -> Result<Self, BuildError> {
        let records: BTreeMap<String, EntityRecord> = serde_json::from_str(json)
            .map_err(|e| BuildError::MalformedDictionary(e.to_string()))?;

        let mut entries = BTreeMap::new();
        for (name, record) in records {
            let replacement = Replacement::from_codepoints(&name, &record.codepoints)?;
            if replacement.to_string() != record.characters {
                return Err(BuildError::InconsistentReplacement { name });
            }
            let _ = entries.insert(name, replacement);
        }
        Ok(Self { entries })
    }

    /// The embedded WHATWG table.
    ///
    /// # Errors
    ///
    /// Fails only if the embedded copy of `entities.json` is corrupt.
    pub fn whatwg() -> Result<Self, BuildError> {
        Self::from_json_str(WHATWG_ENTITIES_JSON)
    }

    /// Look up a name, including its leading '&'.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Replacement> {
        self.entries.get(name).copied()
    }

    /// Number of names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Replacement)> + '_ {
        self.entries
            .iter()
            .map(|(name, replacement)| (name.as_str(), *replacement))
    }
}
