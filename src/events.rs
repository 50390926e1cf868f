use crate::session::GameState;
use crate::summary::SessionSummary;

/// Notifications emitted by the session core, drained by the presentation
/// layer once per frame. Each carries the value it reports so observers
/// never need to reach back into core state.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    StateChanged(GameState),
    ScoreChanged(u32),
    TimeChanged(f64),
    ComboChanged { current: u32, max: u32 },
    PhaseChanged(usize),
    InputChanged { cursor: usize },
    CorrectInput(char),
    IncorrectInput(char),
    WordCompleted(String),
    EntityRetired { success: bool },
    GameOver(SessionSummary),
    /// Diagnostic channel: recoverable oddities that must not halt the loop.
    Warning(String),
}

/// Session-owned message queue replacing per-listener registration.
/// Components push synchronously during a tick; the host drains after.
#[derive(Debug, Default)]
pub struct EventQueue {
    pending: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.pending.push(GameEvent::Warning(message.into()));
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
