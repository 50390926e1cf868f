use crate::events::{EventQueue, GameEvent};

/// Result of feeding one character to the matcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Correct,
    Incorrect,
    /// The matching character that finished the target.
    Completed,
    /// Control character, no target bound, or target already complete.
    Ignored,
}

/// Matches a live character stream against the targeted word. Purely
/// reactive: no timers, no movement logic. Mismatches do not consume the
/// cursor position.
#[derive(Debug, Default)]
pub struct InputMatcher {
    target: String,
    target_len: usize,
    cursor: usize,
}

impl InputMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a new target and resets the cursor. An empty target is a no-op
    /// reported through the diagnostic channel, not a hard failure.
    pub fn set_target(&mut self, text: &str, events: &mut EventQueue) {
        if text.is_empty() {
            events.warn("empty target passed to input matcher");
            return;
        }
        self.target = text.to_lowercase();
        self.target_len = self.target.chars().count();
        self.cursor = 0;
        events.push(GameEvent::InputChanged { cursor: 0 });
    }

    pub fn clear(&mut self) {
        self.target.clear();
        self.target_len = 0;
        self.cursor = 0;
    }

    pub fn has_target(&self) -> bool {
        !self.target.is_empty()
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.has_target() && self.cursor == self.target_len
    }

    pub fn expected_char(&self) -> Option<char> {
        self.target.chars().nth(self.cursor)
    }

    pub fn feed(&mut self, c: char, events: &mut EventQueue) -> MatchOutcome {
        if c.is_control() || !self.has_target() {
            return MatchOutcome::Ignored;
        }
        let expected = match self.expected_char() {
            Some(expected) => expected,
            None => return MatchOutcome::Ignored,
        };
        let received = c.to_lowercase().next().unwrap_or(c);

        if received == expected {
            self.cursor += 1;
            events.push(GameEvent::CorrectInput(received));
            events.push(GameEvent::InputChanged {
                cursor: self.cursor,
            });
            if self.cursor == self.target_len {
                MatchOutcome::Completed
            } else {
                MatchOutcome::Correct
            }
        } else {
            events.push(GameEvent::IncorrectInput(received));
            MatchOutcome::Incorrect
        }
    }

    /// Steps the cursor back one position; no effect at zero.
    pub fn delete_last(&mut self, events: &mut EventQueue) {
        if self.cursor > 0 {
            self.cursor -= 1;
            events.push(GameEvent::InputChanged {
                cursor: self.cursor,
            });
        }
    }
}
