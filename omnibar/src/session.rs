/// What a query update means relative to the previous keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Input is blank, the session starts over.
    Reset,
    /// Exactly one character shorter than before. Carries the previous query,
    /// whose cached results are now stale.
    Backspace { evicted: String },
    /// Longer than before.
    Extend,
    /// Same length, or more than one character shorter.
    Unchanged,
}

/// Per-session typing state, owned by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    last_query: String,
    is_last_character_removed: bool,
}

impl SessionState {
    /// Lengths are compared in unicode scalar values.
    pub fn advance(&mut self, query: &str) -> Transition {
        if query.trim().is_empty() {
            self.reset();
            return Transition::Reset;
        }
        let last_len = self.last_query.chars().count();
        let len = query.chars().count();
        let transition = if last_len == len + 1 {
            self.is_last_character_removed = true;
            Transition::Backspace {
                evicted: std::mem::take(&mut self.last_query),
            }
        } else if len > last_len {
            self.is_last_character_removed = false;
            Transition::Extend
        } else {
            Transition::Unchanged
        };
        self.last_query = query.to_string();
        transition
    }

    pub fn reset(&mut self) {
        self.last_query.clear();
        self.is_last_character_removed = false;
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn is_last_character_removed(&self) -> bool {
        self.is_last_character_removed
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn typing_extends() {
        let mut state = SessionState::default();
        assert_eq!(state.advance("c"), Transition::Extend);
        assert_eq!(state.advance("ca"), Transition::Extend);
        assert_eq!(state.last_query(), "ca");
        assert!(!state.is_last_character_removed());
    }

    #[test]
    fn single_deletion_evicts_previous_query() {
        let mut state = SessionState::default();
        state.advance("cat");
        assert_eq!(
            state.advance("ca"),
            Transition::Backspace {
                evicted: "cat".to_string()
            }
        );
        assert!(state.is_last_character_removed());
        assert_eq!(state.last_query(), "ca");
        assert_eq!(state.advance("cab"), Transition::Extend);
        assert!(!state.is_last_character_removed());
    }

    #[test]
    fn blank_input_resets() {
        let mut state = SessionState::default();
        state.advance("cat");
        state.advance("ca");
        assert_eq!(state.advance(" \t\n"), Transition::Reset);
        assert_eq!(state, SessionState::default());
        assert_eq!(state.advance(""), Transition::Reset);
    }

    #[test]
    fn equal_length_and_bulk_deletion_do_nothing() {
        let mut state = SessionState::default();
        state.advance("cats");
        assert_eq!(state.advance("dogs"), Transition::Unchanged);
        assert_eq!(state.last_query(), "dogs");
        assert_eq!(state.advance("do"), Transition::Unchanged);
        assert_eq!(state.last_query(), "do");
        assert!(!state.is_last_character_removed());
    }

    #[test]
    fn counts_characters_not_bytes() {
        let mut state = SessionState::default();
        state.advance("café");
        assert_eq!(
            state.advance("caf"),
            Transition::Backspace {
                evicted: "café".to_string()
            }
        );
        state.advance("日本語");
        assert_eq!(
            state.advance("日本"),
            Transition::Backspace {
                evicted: "日本語".to_string()
            }
        );
    }

    #[test]
    fn length_rule_ignores_content() {
        // only the character count is compared
        let mut state = SessionState::default();
        state.advance("abc");
        assert_eq!(
            state.advance("xy"),
            Transition::Backspace {
                evicted: "abc".to_string()
            }
        );
    }
}
