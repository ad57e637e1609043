//! Property tests for the builder and decoder.

use std::sync::LazyLock;

use ampersand_trie::{
    Automaton, MatchState, ReferenceDictionary, Replacement, StrCursor, TrieBuilder, build, consume,
};
use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

static NAMES: LazyLock<Vec<String>> = LazyLock::new(|| {
    ReferenceDictionary::whatwg()
        .unwrap()
        .iter()
        .map(|(name, _)| name.to_string())
        .collect()
});

/// Scalars that exercise the interesting stop conditions after a name.
const TAIL: [char; 9] = ['a', 'Z', '3', ';', '=', ' ', '&', '#', 'é'];

/// Text following an '&': a prefix of some real name plus a short random tail.
#[derive(Debug, Clone)]
struct AfterAmpersand(String);

impl Arbitrary for AfterAmpersand {
    fn arbitrary(g: &mut Gen) -> Self {
        let name = g.choose(NAMES.as_slice()).unwrap();
        let body = &name[1..];
        let keep = usize::arbitrary(g) % (body.len() + 1);
        let tail_len = usize::arbitrary(g) % 4;
        let tail: String = (0..tail_len).map(|_| *g.choose(&TAIL).unwrap()).collect();
        Self(format!("{}{tail}", &body[..keep]))
    }
}

fn automaton() -> &'static Automaton {
    ampersand_trie::whatwg().unwrap()
}

fn prefix(input: &str, scalars: usize) -> String {
    input.chars().take(scalars).collect()
}

#[quickcheck]
fn prop_outcome_is_consistent(input: AfterAmpersand, in_attribute: bool) -> bool {
    let input = input.0;
    let mut cursor = StrCursor::new(&input);
    let outcome = consume(automaton(), &mut cursor, in_attribute);

    let consumed_bytes = prefix(&input, outcome.consumed).len();
    let shape_ok = outcome.consumed <= input.chars().count()
        && cursor.position() == consumed_bytes
        && outcome.is_match() == outcome.replacement.is_some()
        && outcome.is_match() == outcome.error.is_none()
        && outcome.is_match() == (outcome.consumed > 0);

    let match_ok = !outcome.is_match()
        || automaton().lookup(&prefix(&input, outcome.consumed)) == outcome.replacement;

    shape_ok && match_ok
}

#[quickcheck]
fn prop_match_is_longest(input: AfterAmpersand) -> bool {
    let input = input.0;
    let mut cursor = StrCursor::new(&input);
    let outcome = consume(automaton(), &mut cursor, false);
    let total = input.chars().count();

    // Outside attributes nothing is ever rejected, and no longer prefix of
    // the input is a name.
    outcome.state != MatchState::Rejected
        && (outcome.consumed + 1..=total).all(|k| automaton().lookup(&prefix(&input, k)).is_none())
}

#[quickcheck]
fn prop_attribute_context_only_vetoes(input: AfterAmpersand) -> bool {
    let input = input.0;
    let text = consume(automaton(), &mut StrCursor::new(&input), false);
    let attribute = consume(automaton(), &mut StrCursor::new(&input), true);

    match attribute.state {
        MatchState::Rejected => text.state == MatchState::MatchedLegacy,
        _ => attribute == text,
    }
}

/// Entries under a few initial letters: a set that is closed under the
/// legacy/terminated pairing, so it always builds.
fn sample_entries() -> Vec<(String, Replacement)> {
    ReferenceDictionary::whatwg()
        .unwrap()
        .iter()
        .filter(|(name, _)| {
            name.starts_with("&a") || name.starts_with("&n") || name.starts_with("&N")
        })
        .map(|(name, replacement)| (name.to_string(), replacement))
        .collect()
}

/// Reorder `items` by sort keys drawn from `keys`, cycling when `keys` is
/// shorter. Ties keep their original order.
fn permute<T>(items: Vec<T>, keys: &[u16]) -> Vec<T> {
    if keys.is_empty() {
        return items;
    }
    let mut keyed: Vec<(u16, T)> = items
        .into_iter()
        .zip(keys.iter().cycle())
        .map(|(item, &key)| (key, item))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);
    keyed.into_iter().map(|(_, item)| item).collect()
}

#[quickcheck]
fn prop_build_ignores_iteration_order(keys: Vec<u16>) -> bool {
    let sorted = sample_entries();
    let shuffled = permute(sorted.clone(), &keys);

    let reference = build(&ReferenceDictionary::from_entries(sorted).unwrap()).unwrap();
    let via_dictionary =
        build(&ReferenceDictionary::from_entries(shuffled.clone()).unwrap()).unwrap();

    // Raw insertion in shuffled order allocates ids differently but must
    // produce the same shape and language.
    let mut builder = TrieBuilder::new();
    for (name, replacement) in &shuffled {
        builder.insert(name, *replacement).unwrap();
    }
    let via_builder = builder.finish().unwrap();

    via_dictionary == reference
        && via_builder.len() == reference.len()
        && via_builder.stats() == reference.stats()
        && via_builder.entries() == reference.entries()
}
