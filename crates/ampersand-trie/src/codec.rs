//! Persisting a built automaton.
//!
//! The artifact is JSON: a small envelope naming the format and version,
//! followed by the node list in id order so child indices stay valid.
//!
//! ```json
//! { "format": "ampersand-automaton", "version": 1,
//!   "nodes": [ { "matched_suffix": "", "children": [null, 1, ...],
//!                "replacement": null, "is_leaf": false }, ... ] }
//! ```
//!
//! Loading always re-runs [`Automaton::from_nodes`], so a hand-edited or
//! truncated artifact is rejected instead of producing a broken automaton.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::automaton::{Automaton, TrieNode};
use crate::error::CodecError;

/// Format tag written into every artifact.
pub const FORMAT: &str = "ampersand-automaton";

/// Current artifact version.
pub const VERSION: u32 = 1;

#[derive(Serialize)]
struct AutomatonDiskRef<'a> {
    format: &'a str,
    version: u32,
    nodes: &'a [TrieNode],
}

#[derive(Deserialize)]
struct AutomatonDisk {
    format: String,
    version: u32,
    nodes: Vec<TrieNode>,
}

impl<'a> From<&'a Automaton> for AutomatonDiskRef<'a> {
    fn from(automaton: &'a Automaton) -> Self {
        Self {
            format: FORMAT,
            version: VERSION,
            nodes: automaton.nodes(),
        }
    }
}

impl AutomatonDisk {
    fn into_automaton(self) -> Result<Automaton, CodecError> {
        if self.format != FORMAT || self.version != VERSION {
            return Err(CodecError::UnsupportedFormat {
                format: self.format,
                version: self.version,
            });
        }
        Ok(Automaton::from_nodes(self.nodes)?)
    }
}

/// Serialize to a JSON string.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn to_json_string(automaton: &Automaton) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&AutomatonDiskRef::from(automaton))?)
}

/// Write the artifact to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file cannot be written and
/// [`CodecError::Json`] if serialization fails.
pub fn save_json(path: &Path, automaton: &Automaton) -> Result<(), CodecError> {
    // Stream to disk; the node list is a few megabytes of JSON.
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &AutomatonDiskRef::from(automaton))?;
    writer.flush()?;
    Ok(())
}

/// Restore an automaton from artifact bytes.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed JSON,
/// [`CodecError::UnsupportedFormat`] for another format or version, and
/// [`CodecError::Invalid`] if the nodes violate an automaton invariant.
pub fn load_json_bytes(data: &[u8]) -> Result<Automaton, CodecError> {
    serde_json::from_slice::<AutomatonDisk>(data)?.into_automaton()
}

/// Restore an automaton from the artifact at `path`.
///
/// # Errors
///
/// Returns [`CodecError::Io`] if the file cannot be read, otherwise as
/// [`load_json_bytes`].
pub fn load_json(path: &Path) -> Result<Automaton, CodecError> {
    let data = std::fs::read(path)?;
    load_json_bytes(&data)
}
