use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub username: String,
    pub session_cookie: String,
}

/// Where the signed-in session is persisted between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl Default for SessionStore {
    fn default() -> Self {
        SessionStore {
            dir: crate::config::config_dir(),
        }
    }
}

impl SessionStore {
    #[cfg(test)]
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        SessionStore { dir: dir.into() }
    }

    fn path(&self) -> PathBuf {
        self.dir.join("session.json")
    }

    pub fn save(&self, session: &SessionData) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        // Restrict directory permissions to owner-only
        #[cfg(unix)]
        set_mode(&self.dir, 0o700)?;

        let json = serde_json::to_string_pretty(session)?;
        let path = self.path();
        std::fs::write(&path, &json)?;

        #[cfg(unix)]
        set_mode(&path, 0o600)?;

        Ok(())
    }

    pub fn load(&self) -> Result<Option<SessionData>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)?;
        let session: SessionData = serde_json::from_str(&json)?;
        Ok(Some(session))
    }

    pub fn clear(&self) -> Result<()> {
        let path = self.path();
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn last_username(&self) -> Option<String> {
        self.load().ok()?.map(|s| s.username)
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    Ok(())
}
