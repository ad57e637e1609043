//! Helper functions for the character reference tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! - State transitions ("Switch to", "Reconsume in")
//! - Input handling ("Consume the next input character")
//! - Parse error reporting

use ampersand_common::warning::warn_once;

use super::issue::{ParseIssue, ParseIssueKind};
use super::machine::{CharRefTokenizer, TokenizerState};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl CharRefTokenizer<'_> {
    /// "Switch to the X state"
    ///
    /// The next character will be consumed on the next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// "Switch to the return state" / "Reconsume in the return state"
    ///
    /// Takes the return state set by the state that saw the '&'. Falls back
    /// to the context's initial state if none was set.
    pub(super) fn take_return_state(&mut self) -> TokenizerState {
        self.return_state
            .take()
            .unwrap_or_else(|| self.context.initial_state())
    }
}

// =============================================================================
// Input Helpers
// =============================================================================

impl CharRefTokenizer<'_> {
    /// "Consume the next input character"
    ///
    /// Returns None at the end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl CharRefTokenizer<'_> {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a parse error against the current reference and logs it.
    /// Parse errors are not fatal; decoding continues.
    ///
    /// The log line names only the kind, so each kind is printed once per
    /// process. Offsets live in the recorded [`ParseIssue`].
    pub(super) fn log_parse_error(&mut self, kind: ParseIssueKind) {
        warn_once("Character Reference", &kind.to_string());
        self.issues.push(ParseIssue {
            kind,
            offset: self.reference_start,
        });
    }
}
