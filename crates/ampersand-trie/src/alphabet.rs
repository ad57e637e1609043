//! The 63-symbol alphabet of named character reference names.
//!
//! [§ 13.5 Named character references](https://html.spec.whatwg.org/multipage/named-characters.html#named-character-references)
//!
//! Every name in the table is built from ASCII alphanumerics and an optional
//! trailing U+003B SEMICOLON, so the automaton only needs one edge slot per
//! symbol in that set.

/// Number of distinct symbols: 10 digits, 26 upper, 26 lower, and ';'.
pub const ALPHABET_SIZE: usize = 63;

/// Index of the ';' symbol.
pub const SEMICOLON: u8 = 62;

/// Map a scalar to its dense alphabet index.
///
/// '0'–'9' map to 0–9, 'A'–'Z' to 10–35, 'a'–'z' to 36–61 and ';' to 62.
/// Anything else has no index.
#[must_use]
pub const fn index(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A'..='Z' => Some(c as u8 - b'A' + 10),
        'a'..='z' => Some(c as u8 - b'a' + 36),
        ';' => Some(SEMICOLON),
        _ => None,
    }
}

/// Inverse of [`index`].
#[must_use]
pub const fn symbol(index: u8) -> Option<char> {
    match index {
        0..=9 => Some((b'0' + index) as char),
        10..=35 => Some((b'A' + index - 10) as char),
        36..=61 => Some((b'a' + index - 36) as char),
        SEMICOLON => Some(';'),
        _ => None,
    }
}
