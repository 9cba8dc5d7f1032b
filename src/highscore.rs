//! Durable best-score storage.
//!
//! A small JSON file under `~/.dinodash/`, namespaced away from anything else
//! the surrounding application persists. The store is an explicit handle the
//! host constructs once and passes around; the simulation core never touches
//! it. Reads default silently, writes are fire-and-forget from the caller's
//! point of view.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

const SCORE_FILE: &str = "highscore.json";

/// On-disk shape of the score file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ScoreFile {
    best: u32,
}

/// Handle to the best-score file.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    /// Open the default store at `~/.dinodash/highscore.json`, creating the
    /// directory if needed.
    pub fn open() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        let dir = home_dir.join(".dinodash");
        fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(SCORE_FILE),
        })
    }

    /// Open a store at an explicit path. Used by tests.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the stored best. A missing or unreadable file is a plain 0,
    /// never an error.
    pub fn load(&self) -> u32 {
        match fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str::<ScoreFile>(&json)
                .unwrap_or_default()
                .best,
            Err(_) => 0,
        }
    }

    /// Persist a new best.
    pub fn save(&self, best: u32) -> io::Result<()> {
        let json = serde_json::to_string_pretty(&ScoreFile { best })
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Explicit player-triggered reset. Gameplay never calls this.
    pub fn reset(&self) -> io::Result<()> {
        self.save(0)
    }
}
