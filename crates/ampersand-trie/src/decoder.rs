//! Longest-match consumption of a named character reference.
//!
//! [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
//!
//! The decoder is a pure function over a shared [`Automaton`]: it keeps no
//! state between calls and only reads its input, so it can run concurrently
//! from any number of tokenizers.

use strum_macros::Display;

use crate::alphabet::{self, SEMICOLON};
use crate::automaton::Automaton;
use crate::replacement::Replacement;

/// A peekable input position, starting right after the '&'.
pub trait CharCursor {
    /// The scalar `offset` positions ahead, without consuming anything.
    fn peek(&self, offset: usize) -> Option<char>;

    /// Consume `count` scalars.
    fn advance(&mut self, count: usize);
}

/// [`CharCursor`] over a string slice.
#[derive(Debug, Clone)]
pub struct StrCursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> StrCursor<'a> {
    /// A cursor at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Current byte offset into the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// The input not yet consumed.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }
}

impl CharCursor for StrCursor<'_> {
    fn peek(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn advance(&mut self, count: usize) {
        let consumed: usize = self.rest().chars().take(count).map(char::len_utf8).sum();
        self.pos += consumed;
    }
}

/// Soft parse errors reported by the decoder. Tokenization continues after
/// either of them, treating the '&' as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseErrorKind {
    /// No prefix of the input is a reference name.
    #[strum(serialize = "unknown-named-character-reference")]
    UnknownReference,
    /// A legacy name inside an attribute value was followed by '=' or an
    /// ASCII alphanumeric and so was not decoded.
    AmbiguousAmpersand,
}

/// Terminal state of one decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum MatchState {
    /// No reference name matched.
    Failed,
    /// The longest match ends in ';'.
    MatchedStrict,
    /// The longest match is a legacy name without ';'.
    MatchedLegacy,
    /// A legacy match vetoed by the ambiguous-ampersand rule.
    Rejected,
}

/// Result of [`consume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Scalars consumed after the '&'. Zero unless a reference matched.
    pub consumed: usize,
    /// Text to splice in place of the consumed reference.
    pub replacement: Option<Replacement>,
    /// Soft parse error to report, if any.
    pub error: Option<ParseErrorKind>,
    /// How the walk ended.
    pub state: MatchState,
}

impl Outcome {
    const fn failed() -> Self {
        Self {
            consumed: 0,
            replacement: None,
            error: Some(ParseErrorKind::UnknownReference),
            state: MatchState::Failed,
        }
    }

    const fn rejected() -> Self {
        Self {
            consumed: 0,
            replacement: None,
            error: Some(ParseErrorKind::AmbiguousAmpersand),
            state: MatchState::Rejected,
        }
    }

    /// True if a reference was consumed.
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(
            self.state,
            MatchState::MatchedStrict | MatchState::MatchedLegacy
        )
    }
}

/// Deepest accepting node seen during the walk.
struct BestMatch {
    consumed: usize,
    replacement: Replacement,
    terminated: bool,
}

/// Consume the longest reference name at `cursor`.
///
/// The cursor must sit immediately after a '&' that is not followed by '#'.
/// On return it has been advanced by exactly `outcome.consumed` scalars;
/// characters looked at past the longest match are never consumed.
///
/// # Algorithm
///
/// STEP 1: Start at the root with nothing consumed and no match.
///
/// STEP 2: While the next scalar has an edge out of the current node, follow
/// it. Each node carrying a replacement becomes the new best match.
///
/// STEP 3: Resolve:
/// - no match: [`MatchState::Failed`];
/// - match ends in ';': [`MatchState::MatchedStrict`];
/// - legacy match inside an attribute followed by '=' or an ASCII
///   alphanumeric: [`MatchState::Rejected`];
/// - otherwise: [`MatchState::MatchedLegacy`].
pub fn consume<C>(automaton: &Automaton, cursor: &mut C, in_attribute: bool) -> Outcome
where
    C: CharCursor + ?Sized,
{
    // STEP 1
    let mut node = automaton.root();
    let mut walked = 0;
    let mut best: Option<BestMatch> = None;

    // STEP 2
    while let Some(c) = cursor.peek(walked) {
        let Some(index) = alphabet::index(c) else {
            break;
        };
        let Some(next) = node.child(index).and_then(|id| automaton.node(id)) else {
            break;
        };
        node = next;
        walked += 1;
        if let Some(replacement) = node.replacement() {
            // Only ';' ends a name, so the edge just taken decides whether
            // the match is terminated.
            best = Some(BestMatch {
                consumed: walked,
                replacement,
                terminated: index == SEMICOLON,
            });
        }
    }

    // STEP 3
    let Some(best) = best else {
        return Outcome::failed();
    };

    // "If the character reference was consumed as part of an attribute, and
    // the last character matched is not a U+003B SEMICOLON character (;), and
    // the next input character is either a U+003D EQUALS SIGN character (=) or
    // an ASCII alphanumeric, then, for historical reasons, flush code points
    // consumed as a character reference and switch to the return state."
    if !best.terminated
        && in_attribute
        && cursor.peek(best.consumed).is_some_and(is_ambiguous_follower)
    {
        return Outcome::rejected();
    }

    cursor.advance(best.consumed);
    Outcome {
        consumed: best.consumed,
        replacement: Some(best.replacement),
        error: None,
        state: if best.terminated {
            MatchState::MatchedStrict
        } else {
            MatchState::MatchedLegacy
        },
    }
}

fn is_ambiguous_follower(c: char) -> bool {
    c == '=' || alphabet::index(c).is_some_and(|index| index != SEMICOLON)
}

impl Automaton {
    /// Consume the longest reference name at `cursor`. See [`consume`].
    pub fn consume<C>(&self, cursor: &mut C, in_attribute: bool) -> Outcome
    where
        C: CharCursor + ?Sized,
    {
        consume(self, cursor, in_attribute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ReferenceDictionary, build};

    fn automaton() -> Automaton {
        let entries = [
            ("&amp", "&"),
            ("&amp;", "&"),
            ("&lt;", "<"),
            ("&not", "\u{AC}"),
            ("&not;", "\u{AC}"),
            ("&notin;", "\u{2209}"),
        ];
        let dictionary = ReferenceDictionary::from_entries(
            entries
                .iter()
                .map(|&(name, value)| (name, Replacement::try_from(value.to_string()).unwrap())),
        )
        .unwrap();
        build(&dictionary).unwrap()
    }

    fn decode(input: &str, in_attribute: bool) -> (Outcome, usize) {
        let automaton = automaton();
        let mut cursor = StrCursor::new(input);
        let outcome = consume(&automaton, &mut cursor, in_attribute);
        (outcome, cursor.position())
    }

    #[test]
    fn test_strict_match() {
        let (outcome, pos) = decode("amp;rest", false);
        assert_eq!(outcome.consumed, 4);
        assert_eq!(outcome.replacement.unwrap().to_string(), "&");
        assert_eq!(outcome.error, None);
        assert_eq!(outcome.state, MatchState::MatchedStrict);
        assert_eq!(pos, 4);
    }

    #[test]
    fn test_legacy_match_outside_attribute() {
        let (outcome, pos) = decode("amp=x", false);
        assert_eq!(outcome.consumed, 3);
        assert_eq!(outcome.state, MatchState::MatchedLegacy);
        assert_eq!(outcome.error, None);
        assert_eq!(pos, 3);
    }

    #[test]
    fn test_ambiguous_ampersand_in_attribute() {
        let (outcome, pos) = decode("amp=x", true);
        assert_eq!(outcome.consumed, 0);
        assert_eq!(outcome.replacement, None);
        assert_eq!(outcome.error, Some(ParseErrorKind::AmbiguousAmpersand));
        assert_eq!(outcome.state, MatchState::Rejected);
        assert_eq!(pos, 0);

        let (outcome, _) = decode("ampx", true);
        assert_eq!(outcome.state, MatchState::Rejected);
    }

    #[test]
    fn test_legacy_match_in_attribute_followed_by_other() {
        let (outcome, _) = decode("amp&", true);
        assert_eq!(outcome.state, MatchState::MatchedLegacy);
        let (outcome, _) = decode("amp", true);
        assert_eq!(outcome.state, MatchState::MatchedLegacy);
    }

    #[test]
    fn test_strict_match_in_attribute_is_never_rejected() {
        let (outcome, _) = decode("amp;=x", true);
        assert_eq!(outcome.state, MatchState::MatchedStrict);
        assert_eq!(outcome.consumed, 4);
    }

    #[test]
    fn test_unknown_reference() {
        let (outcome, pos) = decode("zzzz;", false);
        assert_eq!(outcome.consumed, 0);
        assert_eq!(outcome.replacement, None);
        assert_eq!(outcome.error, Some(ParseErrorKind::UnknownReference));
        assert_eq!(outcome.state, MatchState::Failed);
        assert_eq!(pos, 0);
    }

    #[test]
    fn test_walk_past_match_is_rolled_back() {
        // "noti" walks past "not" but "notix" is not a name.
        let (outcome, pos) = decode("notix", false);
        assert_eq!(outcome.consumed, 3);
        assert_eq!(outcome.replacement.unwrap().to_string(), "\u{AC}");
        assert_eq!(pos, 3);
    }

    #[test]
    fn test_longest_match_wins() {
        let (outcome, _) = decode("notin;", false);
        assert_eq!(outcome.consumed, 6);
        assert_eq!(outcome.replacement.unwrap().to_string(), "\u{2209}");
    }

    #[test]
    fn test_prefix_without_match_fails() {
        let (outcome, _) = decode("l", false);
        assert_eq!(outcome.state, MatchState::Failed);
        let (outcome, _) = decode("lt", false);
        assert_eq!(outcome.state, MatchState::Failed);
    }

    #[test]
    fn test_error_names() {
        assert_eq!(
            ParseErrorKind::UnknownReference.to_string(),
            "unknown-named-character-reference"
        );
        assert_eq!(
            ParseErrorKind::AmbiguousAmpersand.to_string(),
            "ambiguous-ampersand"
        );
        assert_eq!(MatchState::MatchedLegacy.to_string(), "matched-legacy");
    }

    #[test]
    fn test_str_cursor_multibyte() {
        let mut cursor = StrCursor::new("é;x");
        assert_eq!(cursor.peek(0), Some('é'));
        assert_eq!(cursor.peek(2), Some('x'));
        assert_eq!(cursor.peek(3), None);
        cursor.advance(2);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.rest(), "x");
    }
}
