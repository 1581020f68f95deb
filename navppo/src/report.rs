//! Per-episode CSV output.
//!
//! Write failures are logged and never abort training.

use rl::EpisodeSummary;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub const HEADER: &str = "episode,reward,steps";

pub struct Report {
    path: Option<PathBuf>,
    initialized: bool,
}

impl Report {
    /// Truncates `path` and writes the header. With `None` every call is a
    /// no-op.
    #[must_use]
    pub fn init(path: Option<PathBuf>) -> Self {
        let initialized = path.as_ref().is_some_and(|p| {
            let result = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(p)
                .and_then(|mut file| writeln!(file, "{HEADER}"));
            match result {
                Ok(()) => true,
                Err(error) => {
                    tracing::error!(
                        path = %p.display(),
                        ?error,
                        "could not initialise report, episodes will not be saved"
                    );
                    false
                }
            }
        });
        Self { path, initialized }
    }

    pub fn save_line(&self, summary: &EpisodeSummary) {
        let (Some(path), true) = (&self.path, self.initialized) else {
            return;
        };
        let result = OpenOptions::new().append(true).open(path).and_then(|mut file| {
            writeln!(
                file,
                "{},{},{}",
                summary.episode, summary.total_reward, summary.steps
            )
        });
        if let Err(error) = result {
            tracing::error!(path = %path.display(), ?error, "could not write report line");
        }
    }
}
