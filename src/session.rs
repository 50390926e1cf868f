use crate::config::{ConfigError, GameConfig};
use crate::entity::{EntityPool, WordEntity};
use crate::events::{EventQueue, GameEvent};
use crate::matcher::{InputMatcher, MatchOutcome};
use crate::phase::PhaseScheduler;
use crate::scoring::{Rank, ScoringEngine};
use crate::summary::SessionSummary;
use crate::words::WordBank;
use std::collections::VecDeque;

/// Top-level session state. Title → Playing ⇄ Paused → Result → Title.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum GameState {
    Title,
    Playing,
    Paused,
    Result,
}

#[derive(Clone, Copy, Debug)]
enum InputSignal {
    Char(char),
    Delete,
}

/// The session engine: owns every component and advances them one
/// discrete tick at a time. Single-threaded; hosts call the command
/// methods, feed input, call `update(dt)` once per frame, and drain
/// events after.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    config: Option<GameConfig>,
    bank: WordBank,
    scoring: ScoringEngine,
    scheduler: PhaseScheduler,
    pool: EntityPool,
    matcher: InputMatcher,
    events: EventQueue,
    pending: VecDeque<InputSignal>,
    remaining_time: f64,
    elapsed: f64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: GameState::Title,
            config: None,
            bank: WordBank::new(),
            scoring: ScoringEngine::default(),
            scheduler: PhaseScheduler::new(),
            pool: EntityPool::new(1, 0.0),
            matcher: InputMatcher::new(),
            events: EventQueue::new(),
            pending: VecDeque::new(),
            remaining_time: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.scoring.score()
    }

    pub fn remaining_time(&self) -> f64 {
        self.remaining_time
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn phase_index(&self) -> usize {
        self.scheduler.current_index()
    }

    pub fn scoring(&self) -> &ScoringEngine {
        &self.scoring
    }

    pub fn matcher(&self) -> &InputMatcher {
        &self.matcher
    }

    /// Read-only view of the pool for presentation.
    pub fn entities(&self) -> &[WordEntity] {
        self.pool.slots()
    }

    pub fn config(&self) -> Option<&GameConfig> {
        self.config.as_ref()
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    /// Validates the config against the word bank and starts a fresh
    /// session. Fails fast with no state mutation on any validation error.
    pub fn start_game(&mut self, config: GameConfig, bank: WordBank) -> Result<(), ConfigError> {
        config.validate()?;
        for phase in &config.phases {
            match bank.group(&phase.word_group) {
                None => return Err(ConfigError::UnknownWordGroup(phase.word_group.clone())),
                Some(group) if !group.has_valid_records() => {
                    return Err(ConfigError::EmptyWordGroup(phase.word_group.clone()))
                }
                Some(_) => {}
            }
        }

        self.scoring = ScoringEngine::from_config(&config);
        self.scheduler.reset();
        self.pool = EntityPool::new(config.max_live_words, config.lateral_band);
        self.matcher.clear();
        self.pending.clear();
        self.remaining_time = config.total_game_time;
        self.elapsed = 0.0;
        self.bank = bank;
        self.config = Some(config);
        self.set_state(GameState::Playing);
        Ok(())
    }

    pub fn pause_game(&mut self) {
        if self.state == GameState::Playing {
            self.set_state(GameState::Paused);
        }
    }

    pub fn resume_game(&mut self) {
        if self.state == GameState::Paused {
            self.set_state(GameState::Playing);
        }
    }

    /// Ends the session and emits the terminal notification with final
    /// stats. Also triggered internally when the clock runs out.
    pub fn end_game(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        self.pool.clear_all();
        self.matcher.clear();
        self.pending.clear();
        let summary = self.build_summary();
        self.set_state(GameState::Result);
        self.events.push(GameEvent::GameOver(summary));
    }

    pub fn return_to_title(&mut self) {
        if self.state == GameState::Title {
            return;
        }
        self.pool.clear_all();
        self.matcher.clear();
        self.pending.clear();
        self.config = None;
        self.set_state(GameState::Title);
    }

    /// Buffers one decoded character; dropped outside Playing.
    pub fn key_char(&mut self, c: char) {
        if self.state == GameState::Playing {
            self.pending.push_back(InputSignal::Char(c));
        }
    }

    /// Buffers the discrete delete-last-character signal.
    pub fn delete_char(&mut self) {
        if self.state == GameState::Playing {
            self.pending.push_back(InputSignal::Delete);
        }
    }

    /// One frame of simulation. Order within the tick: buffered input in
    /// arrival order, clock, movement/expiry, retiring sweep, spawn,
    /// retarget, phase evaluation, time-exhaustion check. Scoring from this
    /// tick's input is visible to this tick's phase check.
    pub fn update(&mut self, dt: f64) {
        if self.state != GameState::Playing {
            return;
        }
        let Some(config) = self.config.take() else {
            return;
        };

        while let Some(signal) = self.pending.pop_front() {
            self.handle_input(signal);
        }

        self.elapsed += dt;
        self.remaining_time = (self.remaining_time - dt).max(0.0);
        self.events.push(GameEvent::TimeChanged(self.remaining_time));
        self.scheduler.tick(dt);

        let phase = &config.phases[self.scheduler.current_index()];

        let report = self.pool.advance(dt, phase.speed);
        if report.target_expired {
            self.matcher.clear();
            self.scoring.on_miss(&mut self.events);
        }
        for _ in 0..report.expired {
            self.events.push(GameEvent::EntityRetired { success: false });
        }

        self.pool.sweep_retiring(dt);

        if self.pool.spawn_ready(dt) && self.pool.has_capacity() {
            if let Some(group) = self.bank.group_mut(&phase.word_group) {
                if let Some(word) = group.draw_no_duplicate(&mut rand::thread_rng()) {
                    self.pool.spawn(word, &mut rand::thread_rng());
                } else {
                    self.events
                        .warn(format!("word group '{}' yielded no word", phase.word_group));
                }
            }
            self.pool.reset_spawn_timer(phase.spawn_interval);
        }

        if self.pool.target().is_none() {
            if let Some(word) = self.pool.select_target() {
                let target = word.target.clone();
                self.matcher.set_target(&target, &mut self.events);
            }
        }

        self.scheduler.evaluate(
            &config.phases,
            self.scoring.score(),
            self.elapsed,
            &mut self.events,
        );

        self.config = Some(config);

        if self.remaining_time <= 0.0 {
            self.end_game();
        }
    }

    fn handle_input(&mut self, signal: InputSignal) {
        match signal {
            InputSignal::Delete => self.matcher.delete_last(&mut self.events),
            InputSignal::Char(c) => match self.matcher.feed(c, &mut self.events) {
                MatchOutcome::Correct => self.scoring.on_char_typed(),
                MatchOutcome::Incorrect => self.scoring.on_miss(&mut self.events),
                MatchOutcome::Completed => {
                    self.scoring.on_char_typed();
                    if let Some(word) = self.pool.complete_target() {
                        self.events.push(GameEvent::WordCompleted(word.display.clone()));
                        self.scoring.on_word_cleared(&word, &mut self.events);
                        self.events.push(GameEvent::EntityRetired { success: true });
                    }
                    self.matcher.clear();
                }
                MatchOutcome::Ignored => {}
            },
        }
    }

    fn build_summary(&self) -> SessionSummary {
        let thresholds = self
            .config
            .as_ref()
            .map(|c| c.rank_thresholds)
            .unwrap_or_default();
        SessionSummary {
            score: self.scoring.score(),
            rank: Rank::classify(self.scoring.score(), &thresholds),
            max_combo: self.scoring.max_combo(),
            cleared_words: self.scoring.cleared_words(),
            typed_chars: self.scoring.typed_chars(),
            miss_types: self.scoring.miss_types(),
            accuracy: self.scoring.accuracy(),
            typing_speed: self.scoring.typing_speed(self.elapsed),
            elapsed_secs: self.elapsed,
        }
    }

    /// Idempotent: re-entering the current state emits nothing.
    fn set_state(&mut self, next: GameState) {
        if self.state == next {
            return;
        }
        self.state = next;
        self.events.push(GameEvent::StateChanged(next));
    }
}
