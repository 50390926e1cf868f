use crate::config::{GameConfig, RankThresholds};
use crate::events::{EventQueue, GameEvent};
use crate::words::WordRecord;

/// Letter grade over final score, fixed descending ladder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Rank {
    S,
    A,
    B,
    C,
    D,
}

impl Rank {
    pub fn classify(score: u32, thresholds: &RankThresholds) -> Self {
        if score >= thresholds.s {
            Rank::S
        } else if score >= thresholds.a {
            Rank::A
        } else if score >= thresholds.b {
            Rank::B
        } else if score >= thresholds.c {
            Rank::C
        } else {
            Rank::D
        }
    }
}

/// Combo multiplier, score accrual, miss penalty, and cumulative stats.
/// The session gates every call behind the Playing state.
#[derive(Debug, Default)]
pub struct ScoringEngine {
    score: u32,
    combo: u32,
    max_combo: u32,
    typed_chars: u32,
    miss_types: u32,
    cleared_words: u32,
    combo_step: f64,
    max_multiplier: f64,
    miss_penalty: u32,
}

impl ScoringEngine {
    pub fn new(combo_step: f64, max_multiplier: f64, miss_penalty: u32) -> Self {
        Self {
            combo_step,
            max_multiplier,
            miss_penalty,
            ..Self::default()
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.combo_step,
            config.max_combo_multiplier,
            config.miss_penalty,
        )
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn typed_chars(&self) -> u32 {
        self.typed_chars
    }

    pub fn miss_types(&self) -> u32 {
        self.miss_types
    }

    pub fn cleared_words(&self) -> u32 {
        self.cleared_words
    }

    /// `min(1 + combo * k, max)`; non-decreasing in combo and bounded.
    pub fn multiplier(&self) -> f64 {
        (1.0 + self.combo as f64 * self.combo_step).min(self.max_multiplier)
    }

    /// Applies the combo multiplier to `base` and accrues the rounded
    /// result. Returns the points awarded.
    pub fn add_score(&mut self, base: u32, events: &mut EventQueue) -> u32 {
        let awarded = (base as f64 * self.multiplier()).round() as u32;
        self.score += awarded;
        events.push(GameEvent::ScoreChanged(self.score));
        awarded
    }

    pub fn on_char_typed(&mut self) {
        self.typed_chars += 1;
    }

    pub fn on_word_cleared(&mut self, word: &WordRecord, events: &mut EventQueue) {
        self.cleared_words += 1;
        self.combo += 1;
        if self.combo > self.max_combo {
            self.max_combo = self.combo;
        }
        events.push(GameEvent::ComboChanged {
            current: self.combo,
            max: self.max_combo,
        });
        self.add_score(word.score_value, events);
    }

    /// Miss-type or word expiry: combo resets, penalty applies floored at
    /// zero. ScoreChanged only fires when the penalty actually bit.
    pub fn on_miss(&mut self, events: &mut EventQueue) {
        self.miss_types += 1;
        self.combo = 0;
        events.push(GameEvent::ComboChanged {
            current: 0,
            max: self.max_combo,
        });
        if self.miss_penalty > 0 {
            self.score = self.score.saturating_sub(self.miss_penalty);
            events.push(GameEvent::ScoreChanged(self.score));
        }
    }

    /// Percent of typed characters that were correct; 100 before any input.
    pub fn accuracy(&self) -> f64 {
        let attempts = self.typed_chars + self.miss_types;
        if attempts == 0 {
            100.0
        } else {
            self.typed_chars as f64 / attempts as f64 * 100.0
        }
    }

    /// Correct characters per second; 0 until time has elapsed.
    pub fn typing_speed(&self, elapsed_secs: f64) -> f64 {
        if elapsed_secs <= 0.0 {
            0.0
        } else {
            self.typed_chars as f64 / elapsed_secs
        }
    }
}
