use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::types::constant::LAST_RESULT_FILE_NAME;
use crate::types::VerdictResult;
use crate::{FactCheckError, FactCheckResult};

/// Single slot holding the last verdict, one JSON file in the data directory.
#[derive(Debug, Clone)]
pub struct LastVerdictStore {
    path: PathBuf,
}

impl LastVerdictStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self { path: data_dir.as_ref().join(LAST_RESULT_FILE_NAME) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A file that no longer parses is deleted and reported as empty.
    pub fn load(&self) -> FactCheckResult<Option<VerdictResult>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Stored verdict is unreadable, removing it.");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Replaces whatever was stored before.
    pub fn save(&self, result: &VerdictResult) -> FactCheckResult<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| FactCheckError::Store(format!("{} has no parent directory", self.path.display())))?;
        fs::create_dir_all(dir)?;

        // Written aside and renamed so a crash never leaves half a file behind
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec_pretty(result)?)?;
        fs::rename(&staging, &self.path)?;
        debug!(path = %self.path.display(), "Stored last verdict");
        Ok(())
    }

    pub fn clear(&self) -> FactCheckResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
