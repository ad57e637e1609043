//! Replacement text of a named character reference.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! "This table lists the character reference names that are supported by
//! HTML, and the code points to which they refer."
//!
//! Every entry refers to one or two code points, so the value is stored
//! inline rather than as a heap string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// One or two Unicode scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Replacement {
    /// The scalars. Unused slots hold U+0000 so derived equality is exact.
    chars: [char; 2],
    /// How many slots in `chars` are valid (1 or 2).
    len: u8,
}

impl Replacement {
    /// Create a replacement from one or two scalars.
    ///
    /// Returns `None` for an empty slice or one longer than two.
    #[must_use]
    pub const fn new(chars: &[char]) -> Option<Self> {
        match *chars {
            [a] => Some(Self {
                chars: [a, '\0'],
                len: 1,
            }),
            [a, b] => Some(Self {
                chars: [a, b],
                len: 2,
            }),
            _ => None,
        }
    }

    /// Create a replacement from raw code points, as found in `entities.json`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidCodepoint`] if a code point is a surrogate
    /// or out of range, and [`BuildError::ReplacementLength`] if there are not
    /// one or two of them.
    pub fn from_codepoints(name: &str, codepoints: &[u32]) -> Result<Self, BuildError> {
        let chars = codepoints
            .iter()
            .map(|&codepoint| {
                char::from_u32(codepoint).ok_or_else(|| BuildError::InvalidCodepoint {
                    name: name.to_string(),
                    codepoint,
                })
            })
            .collect::<Result<Vec<char>, BuildError>>()?;

        Self::new(&chars).ok_or_else(|| BuildError::ReplacementLength {
            name: name.to_string(),
            len: chars.len(),
        })
    }

    /// The scalars of this replacement.
    #[must_use]
    pub fn as_chars(&self) -> &[char] {
        &self.chars[..usize::from(self.len)]
    }

    /// Number of scalars (1 or 2).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether there are no scalars. Never true for a constructed value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for Replacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.as_chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl From<Replacement> for String {
    fn from(replacement: Replacement) -> Self {
        replacement.to_string()
    }
}

impl TryFrom<String> for Replacement {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let chars: Vec<char> = value.chars().collect();
        Self::new(&chars)
            .ok_or_else(|| format!("expected 1 or 2 scalars, found {}", chars.len()))
    }
}
