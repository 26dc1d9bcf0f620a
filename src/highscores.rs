//! Best survival time
//!
//! Persisted as a small JSON file next to the runner.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BestTime {
    /// Longest survival in seconds (0 when nothing recorded yet)
    pub seconds: f32,
}

impl BestTime {
    pub fn new(seconds: f32) -> Self {
        Self {
            seconds: seconds.max(0.0),
        }
    }

    /// Record a finished run; returns true if it beat the stored best
    pub fn record(&mut self, survival_secs: f32) -> bool {
        if survival_secs > self.seconds {
            self.seconds = survival_secs;
            true
        } else {
            false
        }
    }

    /// Load from `path`; a missing file means no best time yet
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No best time at {}, starting fresh", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let best: Self = serde_json::from_str(&json)?;
        log::info!("Loaded best time {:.1}s", best.seconds);
        Ok(best)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Best time saved ({:.1}s)", self.seconds);
        Ok(())
    }
}
