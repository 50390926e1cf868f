use crate::scoring::Rank;
use chrono::prelude::*;
use directories::ProjectDirs;
use std::fs::OpenOptions;
use std::io::{self, ErrorKind};
use std::path::Path;

/// Final stats for one finished session, carried by the game-over
/// notification.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub score: u32,
    pub rank: Rank,
    pub max_combo: u32,
    pub cleared_words: u32,
    pub typed_chars: u32,
    pub miss_types: u32,
    pub accuracy: f64,
    /// Correct characters per second over the whole session.
    pub typing_speed: f64,
    pub elapsed_secs: f64,
}

impl SessionSummary {
    /// Appends one CSV row to `path`, writing the header when the file is
    /// new.
    pub fn write_log<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let needs_header = !path.exists();

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = csv::Writer::from_writer(file);

        if needs_header {
            writer
                .write_record([
                    "date",
                    "score",
                    "rank",
                    "max_combo",
                    "cleared_words",
                    "typed_chars",
                    "miss_types",
                    "accuracy",
                    "chars_per_sec",
                    "elapsed_secs",
                ])
                .map_err(|e| io::Error::new(ErrorKind::Other, e))?;
        }

        writer
            .write_record([
                Local::now().format("%c").to_string(),
                self.score.to_string(),
                self.rank.to_string(),
                self.max_combo.to_string(),
                self.cleared_words.to_string(),
                self.typed_chars.to_string(),
                self.miss_types.to_string(),
                format!("{:.1}", self.accuracy),
                format!("{:.2}", self.typing_speed),
                format!("{:.2}", self.elapsed_secs),
            ])
            .map_err(|e| io::Error::new(ErrorKind::Other, e))?;

        writer.flush()
    }

    /// Appends to the default results log under the user's config dir.
    pub fn append_to_log(&self) -> io::Result<()> {
        if let Some(proj_dirs) = ProjectDirs::from("", "", "typefall") {
            self.write_log(proj_dirs.config_dir().join("results.csv"))?;
        }
        Ok(())
    }
}
