//! The character reference tokenizer state machine.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! Only the data and attribute value states and the three character
//! reference states are modelled. Tags, comments and numeric references are
//! passed through as text.

use ampersand_trie::{Automaton, MatchState, StrCursor};
use strum_macros::Display;

use super::issue::{ParseIssue, ParseIssueKind};

/// Where the input being decoded came from.
///
/// Only attribute values are subject to the ambiguous-ampersand rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Text content: the data state is the return state.
    Text,
    /// The inside of an attribute value, quotes already removed.
    AttributeValue,
}

impl Context {
    pub(super) const fn initial_state(self) -> TokenizerState {
        match self {
            Self::Text => TokenizerState::Data,
            Self::AttributeValue => TokenizerState::AttributeValue,
        }
    }
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The subset of tokenizer states involved in named character references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    /// and its single-quoted and unquoted siblings, minus the delimiters.
    AttributeValue,
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    CharacterReference,
    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    NamedCharacterReference,
    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    AmbiguousAmpersand,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to tokenize HTML."
///
/// Decodes the named character references in one run of text or one
/// attribute value. Numeric references are left as literal text.
pub struct CharRefTokenizer<'a> {
    pub(super) automaton: &'a Automaton,
    pub(super) context: Context,
    pub(super) state: TokenizerState,
    pub(super) return_state: Option<TokenizerState>,
    pub(super) input: &'a str,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) at_eof: bool,
    // When true, the next iteration of the main loop will not consume a new character.
    // "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,

    pub(super) temporary_buffer: String,
    // Byte offset of the '&' that opened the current reference.
    pub(super) reference_start: usize,

    pub(super) output: String,
    pub(super) issues: Vec<ParseIssue>,
}

impl<'a> CharRefTokenizer<'a> {
    /// Create a tokenizer over `input`.
    #[must_use]
    pub fn new(automaton: &'a Automaton, input: &'a str, context: Context) -> Self {
        CharRefTokenizer {
            automaton,
            context,
            state: context.initial_state(),
            return_state: None,
            input,
            current_pos: 0,
            current_input_character: None,
            at_eof: false,
            reconsume: false,
            temporary_buffer: String::new(),
            reference_start: 0,
            output: String::with_capacity(input.len()),
            issues: Vec::new(),
        }
    }

    /// Parse errors recorded so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// The decoded text and the recorded parse errors.
    #[must_use]
    pub fn into_output(self) -> (String, Vec<ParseIssue>) {
        (self.output, self.issues)
    }

    /// Run the state machine to the end of the input.
    pub fn run(&mut self) {
        loop {
            // Each state begins by consuming the next input character,
            // unless we're reconsuming from a previous state transition.
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            if self.current_input_character.is_none() && self.at_eof {
                break;
            }
            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::AttributeValue => self.handle_attribute_value_state(),
                TokenizerState::CharacterReference => self.handle_character_reference_state(),
                TokenizerState::NamedCharacterReference => {
                    self.handle_named_character_reference_state();
                }
                TokenizerState::AmbiguousAmpersand => self.handle_ambiguous_ampersand_state(),
            }
        }
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::Data);
                self.reference_start = self.current_pos - 1;
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "EOF - Emit an end-of-file token."
            None => self.at_eof = true,
            // "Anything else - Emit the current input character as a character token."
            Some(c) => self.output.push(c),
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    fn handle_attribute_value_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the attribute value
            // (double-quoted) state. Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValue);
                self.reference_start = self.current_pos - 1;
                self.switch_to(TokenizerState::CharacterReference);
            }
            None => self.at_eof = true,
            // "Anything else - Append the current input character to the current
            // attribute's value."
            Some(c) => self.output.push(c),
        }
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    fn handle_character_reference_state(&mut self) {
        // "Set the temporary buffer to the empty string."
        self.temporary_buffer.clear();
        // "Append a U+0026 AMPERSAND character (&) to the temporary buffer."
        self.temporary_buffer.push('&');

        match self.current_input_character {
            // "ASCII alphanumeric"
            // "Reconsume in the named character reference state."
            Some(c) if c.is_ascii_alphanumeric() => {
                self.reconsume_in(TokenizerState::NamedCharacterReference);
            }
            // "U+0023 NUMBER SIGN (#)"
            // Numeric references are not decoded: flush "&#" as text and let
            // the digits that follow pass through the return state.
            Some('#') => {
                self.temporary_buffer.push('#');
                self.flush_code_points_consumed_as_character_reference();
                let return_state = self.take_return_state();
                self.switch_to(return_state);
            }
            // "Anything else"
            // "Flush code points consumed as a character reference.
            // Reconsume in the return state."
            _ => {
                self.flush_code_points_consumed_as_character_reference();
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
        }
    }

    /// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
    fn handle_named_character_reference_state(&mut self) {
        // We enter this state via reconsume, so the first alphanumeric has
        // been consumed already. The automaton walks from just after the '&'
        // and reports how much of the input the longest match covers.
        let start = self.reference_start + 1;
        let input = self.input;
        let mut cursor = StrCursor::new(&input[start..]);
        let outcome = self
            .automaton
            .consume(&mut cursor, self.is_consumed_as_part_of_attribute());

        match outcome.state {
            // "If there is a match"
            MatchState::MatchedStrict | MatchState::MatchedLegacy => {
                self.current_pos = start + cursor.position();

                // "If the last character matched is not a U+003B SEMICOLON
                // character (;), then this is a
                // missing-semicolon-after-character-reference parse error."
                if outcome.state == MatchState::MatchedLegacy {
                    self.log_parse_error(ParseIssueKind::MissingSemicolonAfterCharacterReference);
                }

                // "Set the temporary buffer to the empty string. Append one or
                // two characters corresponding to the character reference name
                // to the temporary buffer. Flush code points consumed as a
                // character reference. Switch to the return state."
                self.temporary_buffer.clear();
                if let Some(replacement) = outcome.replacement {
                    self.temporary_buffer.extend(replacement.as_chars());
                }
                self.flush_code_points_consumed_as_character_reference();
                let return_state = self.take_return_state();
                self.switch_to(return_state);
            }
            // "...for historical reasons, flush code points consumed as a
            // character reference and switch to the return state."
            //
            // Nothing after the '&' was consumed, so the name is re-read as
            // ordinary text by the return state.
            MatchState::Rejected => {
                if let Some(kind) = outcome.error {
                    self.log_parse_error(kind.into());
                }
                self.flush_code_points_consumed_as_character_reference();
                self.current_pos = start;
                let return_state = self.take_return_state();
                self.switch_to(return_state);
            }
            // "Otherwise: Flush code points consumed as a character reference.
            // Switch to the ambiguous ampersand state."
            //
            // The decoder reports every failure as an unknown reference; the
            // ambiguous ampersand state only raises it when a ';' follows.
            MatchState::Failed => {
                self.flush_code_points_consumed_as_character_reference();
                self.current_pos = start;
                self.switch_to(TokenizerState::AmbiguousAmpersand);
            }
        }
    }

    /// [§ 13.2.5.74 Ambiguous ampersand state](https://html.spec.whatwg.org/multipage/parsing.html#ambiguous-ampersand-state)
    fn handle_ambiguous_ampersand_state(&mut self) {
        match self.current_input_character {
            // "ASCII alphanumeric"
            // "If the character reference was consumed as part of an attribute, then
            // append the current input character to the current attribute's value.
            // Otherwise, emit the current input character as a character token."
            Some(c) if c.is_ascii_alphanumeric() => self.output.push(c),
            // "U+003B SEMICOLON (;)"
            // "This is an unknown-named-character-reference parse error.
            // Reconsume in the return state."
            Some(';') => {
                self.log_parse_error(ParseIssueKind::UnknownNamedCharacterReference);
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
            // "Anything else"
            // "Reconsume in the return state."
            _ => {
                let return_state = self.take_return_state();
                self.reconsume_in(return_state);
            }
        }
    }
}
