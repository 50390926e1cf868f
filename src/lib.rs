// Library surface for headless/integration tests and embedding hosts.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod config;
pub mod entity;
pub mod events;
pub mod matcher;
pub mod phase;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod summary;
pub mod words;

pub use config::{ConfigError, GameConfig, PhaseSpec, RankThresholds};
pub use entity::{EntityPool, EntityState, WordEntity};
pub use events::{EventQueue, GameEvent};
pub use matcher::{InputMatcher, MatchOutcome};
pub use phase::PhaseScheduler;
pub use scoring::{Rank, ScoringEngine};
pub use session::{GameState, Session};
pub use summary::SessionSummary;
pub use words::{WordBank, WordGroup, WordRecord};
