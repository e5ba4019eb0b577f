use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// On-disk shape of the preference file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "darkMode", default)]
    pub dark_mode: bool,
}

/// Persists the dark-mode flag in a small JSON file
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing or unreadable file means the default (light) theme.
    pub async fn load(&self) -> Preferences {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(path = %self.path.display(), "Ignoring unreadable preference file: {}", e);
                    Preferences::default()
                }
            },
            Err(e) => {
                debug!(path = %self.path.display(), "No preference file: {}", e);
                Preferences::default()
            }
        }
    }

    pub async fn save(&self, prefs: Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec(&prefs)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
