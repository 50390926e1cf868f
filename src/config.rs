use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;

/// Embedded data assets: default difficulty config plus the stock word lists.
pub(crate) static DATA_DIR: Dir = include_dir!("src/data");

/// Descending score thresholds for the final letter grade. Anything below
/// `c` ranks D.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankThresholds {
    pub s: u32,
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl Default for RankThresholds {
    fn default() -> Self {
        Self {
            s: 5000,
            a: 3000,
            b: 1500,
            c: 500,
        }
    }
}

/// One difficulty stage. Exactly one of `transition_score` / `duration`
/// must be positive: the phase is either score-gated or time-gated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseSpec {
    pub name: String,
    /// Name of the word group this phase draws from.
    pub word_group: String,
    /// Path units per second; the path runs 0.0 (spawn edge) to 1.0 (exit).
    pub speed: f64,
    /// Seconds between spawns.
    pub spawn_interval: f64,
    /// Score at which play moves past this phase (0 = not score-gated).
    #[serde(default)]
    pub transition_score: u32,
    /// Seconds this phase lasts (0 = not time-gated).
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub total_game_time: f64,
    pub phases: Vec<PhaseSpec>,
    /// Combo multiplier step `k` in `min(1 + combo * k, max_combo_multiplier)`.
    pub combo_step: f64,
    pub max_combo_multiplier: f64,
    /// Points subtracted on a miss (floored at zero score).
    pub miss_penalty: u32,
    /// Cap on concurrently live (moving or targeted) word entities.
    pub max_live_words: usize,
    /// Half-width of the random lateral spawn offset band.
    pub lateral_band: f64,
    #[serde(default)]
    pub rank_thresholds: RankThresholds,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PhaseError {
    NonPositiveSpeed,
    NonPositiveInterval,
    /// Neither transition_score nor duration is positive.
    NoTrigger,
    /// Both transition_score and duration are positive.
    DualTrigger,
}

impl fmt::Display for PhaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhaseError::NonPositiveSpeed => write!(f, "speed must be positive"),
            PhaseError::NonPositiveInterval => write!(f, "spawn_interval must be positive"),
            PhaseError::NoTrigger => {
                write!(f, "exactly one of transition_score/duration must be positive")
            }
            PhaseError::DualTrigger => {
                write!(f, "transition_score and duration cannot both be positive")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NonPositiveGameTime,
    NoPhases,
    ZeroLiveWordCap,
    InvalidComboParams,
    NegativeLateralBand,
    Phase { index: usize, reason: PhaseError },
    UnknownWordGroup(String),
    EmptyWordGroup(String),
    Io(String),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveGameTime => write!(f, "total_game_time must be positive"),
            ConfigError::NoPhases => write!(f, "config must define at least one phase"),
            ConfigError::ZeroLiveWordCap => write!(f, "max_live_words must be at least 1"),
            ConfigError::InvalidComboParams => {
                write!(f, "combo_step must be >= 0 and max_combo_multiplier >= 1")
            }
            ConfigError::NegativeLateralBand => write!(f, "lateral_band must be >= 0"),
            ConfigError::Phase { index, reason } => {
                write!(f, "phase {index}: {reason}")
            }
            ConfigError::UnknownWordGroup(name) => {
                write!(f, "phase references unknown word group '{name}'")
            }
            ConfigError::EmptyWordGroup(name) => {
                write!(f, "word group '{name}' has no valid records")
            }
            ConfigError::Io(msg) => write!(f, "config io error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl Error for ConfigError {}

impl GameConfig {
    /// Structural validation. Word-group availability is checked separately
    /// at session start, where the word bank is known.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_game_time <= 0.0 {
            return Err(ConfigError::NonPositiveGameTime);
        }
        if self.phases.is_empty() {
            return Err(ConfigError::NoPhases);
        }
        if self.max_live_words == 0 {
            return Err(ConfigError::ZeroLiveWordCap);
        }
        if self.combo_step < 0.0 || self.max_combo_multiplier < 1.0 {
            return Err(ConfigError::InvalidComboParams);
        }
        if self.lateral_band < 0.0 {
            return Err(ConfigError::NegativeLateralBand);
        }
        for (index, phase) in self.phases.iter().enumerate() {
            let reason = if phase.speed <= 0.0 {
                Some(PhaseError::NonPositiveSpeed)
            } else if phase.spawn_interval <= 0.0 {
                Some(PhaseError::NonPositiveInterval)
            } else if phase.transition_score == 0 && phase.duration <= 0.0 {
                Some(PhaseError::NoTrigger)
            } else if phase.transition_score > 0 && phase.duration > 0.0 {
                Some(PhaseError::DualTrigger)
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::Phase { index, reason });
            }
        }
        Ok(())
    }

    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: GameConfig =
            serde_json::from_str(data).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&data)
    }

    /// The stock three-phase config compiled into the binary.
    pub fn load_default() -> Self {
        let file = DATA_DIR
            .get_file("default_config.json")
            .expect("default config not embedded");
        let data = file
            .contents_utf8()
            .expect("default config is not valid utf-8");
        Self::from_json_str(data).expect("embedded default config is invalid")
    }
}
