//! Map/session identity persistence
//!
//! The logical map identifier plays the role the address fragment plays in a
//! browser: a second process pointed at the same identifier attaches to the
//! same logical map. Absence of an identifier means "create new", presence
//! means "join existing". The identifier survives restarts in a small
//! session file.

use crate::error::Result;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Resolved session identity for one benchmark process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Identifier of the logical map
    pub map_id: String,
    /// Whether this process created the map (vs. joined an existing one)
    pub created: bool,
}

/// Reads and writes the persisted map identifier.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Location of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted identifier, if any.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// Persist the identifier for the next process to join.
    pub fn save(&self, map_id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, format!("{}\n", map_id))?;
        Ok(())
    }

    /// Remove the persisted identifier so the next run creates a fresh map.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    /// Resolve the identity for this process.
    ///
    /// Precedence: explicit override (CLI/env) > persisted file > freshly
    /// minted identifier. Whatever wins is persisted back so a companion
    /// process can join the same map.
    pub fn resolve(&self, explicit: Option<&str>) -> Result<SessionIdentity> {
        if let Some(id) = explicit {
            self.save(id)?;
            return Ok(SessionIdentity {
                map_id: id.to_string(),
                created: false,
            });
        }

        if let Some(id) = self.load()? {
            return Ok(SessionIdentity {
                map_id: id,
                created: false,
            });
        }

        let map_id = Uuid::new_v4().to_string();
        self.save(&map_id)?;
        Ok(SessionIdentity {
            map_id,
            created: true,
        })
    }
}
