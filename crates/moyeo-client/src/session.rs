//! Session store: the authenticated identity and bearer credential.
//!
//! Persisted at `${MOYEO_HOME}/session.json` with restricted permissions
//! (0600). In-memory state and the file are updated in the same call, so
//! no partial-write state is observable through this type. There is no
//! expiry or refresh logic: an expired credential only surfaces when a
//! later API call fails.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use moyeo_types::user::AuthUser;

use crate::config::paths;

/// Credential plus identity snapshot. Exactly one per client context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: AuthUser,
}

/// Fields that `update_identity` can merge into the current identity.
#[derive(Debug, Clone, Default)]
pub struct IdentityPatch {
    pub name: Option<String>,
    pub nickname: Option<String>,
    pub university: Option<String>,
    pub campus: Option<String>,
}

#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    session: Option<Session>,
}

impl SessionStore {
    /// Opens the store at the default session path.
    pub fn load() -> Result<Self> {
        Self::load_from(paths::session_path())
    }

    /// Opens the store backed by `path`, seeding in-memory state from the
    /// file if it exists. A malformed file is an error rather than a
    /// silently empty session.
    pub fn load_from(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let session = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read session from {}", path.display()))?;
            Some(
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse session from {}", path.display()))?,
            )
        } else {
            None
        };
        Ok(Self { path, session })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Stores the credential and identity and persists both.
    pub fn login(&mut self, token: impl Into<String>, user: AuthUser) -> Result<()> {
        self.session = Some(Session {
            token: token.into(),
            user,
        });
        self.persist()
    }

    /// Clears the session in memory and on disk. Safe to call when
    /// already logged out.
    pub fn logout(&mut self) -> Result<()> {
        self.session = None;
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }

    /// Merges `patch` into the current identity and persists. No-op when
    /// no session exists.
    pub fn update_identity(&mut self, patch: IdentityPatch) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        if let Some(name) = patch.name {
            session.user.name = name;
        }
        if let Some(nickname) = patch.nickname {
            session.user.nickname = nickname;
        }
        if let Some(university) = patch.university {
            session.user.university = Some(university);
        }
        if let Some(campus) = patch.campus {
            session.user.campus = Some(campus);
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let Some(session) = &self.session else {
            return Ok(());
        };
        let contents =
            serde_json::to_string_pretty(session).context("Failed to serialize session")?;
        write_restricted(&self.path, &contents)
    }
}

/// Writes `contents` with permissions restricted to the owner (0600 on unix).
fn write_restricted(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o600)
            .open(path)
            .with_context(|| format!("Failed to open {} for writing", path.display()))?;
        file.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    #[cfg(not(unix))]
    {
        fs::write(path, contents)
            .with_context(|| format!("Failed to write to {}", path.display()))?;
    }

    Ok(())
}
