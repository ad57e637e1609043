//! Character reference helpers for the tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)

use super::machine::{CharRefTokenizer, TokenizerState};

impl CharRefTokenizer<'_> {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// Returns true if the return state is an attribute value state.
    /// WHATWG: "consumed as part of an attribute"
    pub(super) const fn is_consumed_as_part_of_attribute(&self) -> bool {
        matches!(self.return_state, Some(TokenizerState::AttributeValue))
    }

    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    /// "Flush code points consumed as a character reference"
    /// WHATWG: "If the character reference was consumed as part of an attribute,
    /// then append each character to the current attribute's value. Otherwise,
    /// emit each character as a character token."
    ///
    /// Both land in the same output buffer here: the caller decides whether it
    /// is text or an attribute value.
    pub(super) fn flush_code_points_consumed_as_character_reference(&mut self) {
        self.output.push_str(&self.temporary_buffer);
    }
}
