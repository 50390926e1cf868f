use crate::config::{ConfigError, GameConfig, DATA_DIR};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use serde_json::from_str;
use std::collections::{HashMap, HashSet};

/// A single typeable word. `target` is what the player types, `display`
/// is what the presentation layer shows.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct WordRecord {
    pub target: String,
    pub display: String,
    pub score_value: u32,
}

impl WordRecord {
    pub fn is_valid(&self) -> bool {
        !self.target.is_empty() && !self.display.is_empty() && self.score_value > 0
    }
}

#[derive(Debug, Clone, Deserialize)]
struct WordGroupFile {
    name: String,
    words: Vec<WordRecord>,
}

/// An ordered word collection with no-repeat draw semantics. The drawn-index
/// set is the only mutable part; record content is never touched.
#[derive(Debug, Clone)]
pub struct WordGroup {
    name: String,
    records: Vec<WordRecord>,
    drawn: HashSet<usize>,
}

impl WordGroup {
    pub fn new(name: impl Into<String>, records: Vec<WordRecord>) -> Self {
        Self {
            name: name.into(),
            records,
            drawn: HashSet::new(),
        }
    }

    /// Loads `wordlists/{name}.json` from the embedded data directory.
    pub fn from_embedded(name: &str) -> Result<Self, ConfigError> {
        let path = format!("wordlists/{name}.json");
        let file = DATA_DIR
            .get_file(&path)
            .ok_or_else(|| ConfigError::UnknownWordGroup(name.to_string()))?;
        let data = file
            .contents_utf8()
            .ok_or_else(|| ConfigError::Parse(format!("{path} is not valid utf-8")))?;
        let parsed: WordGroupFile =
            from_str(data).map_err(|e| ConfigError::Parse(format!("{path}: {e}")))?;
        Ok(Self::new(parsed.name, parsed.words))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    pub fn valid_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_valid()).count()
    }

    /// A group with zero valid records is globally invalid and must block
    /// session start.
    pub fn has_valid_records(&self) -> bool {
        self.records.iter().any(|r| r.is_valid())
    }

    pub fn reset_drawn(&mut self) {
        self.drawn.clear();
    }

    fn eligible_indices(&self) -> Vec<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(i, r)| r.is_valid() && !self.drawn.contains(i))
            .map(|(i, _)| i)
            .collect()
    }

    /// Draws a uniformly random word that has not been drawn this cycle.
    /// When the cycle is exhausted the drawn-set resets and the draw runs
    /// against all valid records again, which can return the same record as
    /// the immediately preceding draw. Returns `None` only when the group
    /// has no valid records at all; the caller must not spawn in that case.
    pub fn draw_no_duplicate(&mut self, rng: &mut impl Rng) -> Option<WordRecord> {
        let mut eligible = self.eligible_indices();
        if eligible.is_empty() {
            self.drawn.clear();
            eligible = self.eligible_indices();
        }
        let index = *eligible.choose(rng)?;
        self.drawn.insert(index);
        Some(self.records[index].clone())
    }
}

/// Read-mostly registry of word groups keyed by name.
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    groups: HashMap<String, WordGroup>,
}

impl WordBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: WordGroup) {
        self.groups.insert(group.name().to_string(), group);
    }

    pub fn group(&self, name: &str) -> Option<&WordGroup> {
        self.groups.get(name)
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut WordGroup> {
        self.groups.get_mut(name)
    }

    /// Loads every group the config's phases reference from the embedded
    /// word lists.
    pub fn for_config(config: &GameConfig) -> Result<Self, ConfigError> {
        let mut bank = Self::new();
        for phase in &config.phases {
            if bank.group(&phase.word_group).is_none() {
                bank.insert(WordGroup::from_embedded(&phase.word_group)?);
            }
        }
        Ok(bank)
    }
}
