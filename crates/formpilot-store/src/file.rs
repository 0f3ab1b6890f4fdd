//! File system profile store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::debug;

use formpilot_protocols::{AppSettings, Profile, ProfileStore, StoreError};

const PROFILE_FILE: &str = "profile.json";
const SETTINGS_FILE: &str = "settings.json";

/// File system based profile store.
///
/// ```text
/// {storage_path}/
/// ├── profile.json
/// └── settings.json
/// ```
pub struct FileProfileStore {
    storage_path: PathBuf,
}

impl FileProfileStore {
    /// Create a store rooted at `storage_path`, creating the directory.
    pub async fn new(storage_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let storage_path = storage_path.into();
        fs::create_dir_all(&storage_path).await?;
        debug!("FileProfileStore initialized at {:?}", storage_path);
        Ok(Self { storage_path })
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn profile_path(&self) -> PathBuf {
        self.storage_path.join(PROFILE_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.storage_path.join(SETTINGS_FILE)
    }

    /// Read a JSON file. `Ok(None)` when it does not exist.
    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_str(&content).map_err(|e| {
            StoreError::SerializationError(format!("Failed to parse {:?}: {}", path, e))
        })?;
        Ok(Some(value))
    }

    /// Write a JSON file through a temporary sibling and a rename.
    async fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(value)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, content).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for FileProfileStore {
    async fn get_profile(&self) -> Result<Profile, StoreError> {
        let profile = Self::read_json(&self.profile_path()).await?;
        Ok(profile.unwrap_or_else(Profile::placeholder))
    }

    async fn save_profile(&self, mut profile: Profile) -> Result<(), StoreError> {
        profile.touch();
        let path = self.profile_path();
        Self::write_json(&path, &profile).await?;
        debug!("Saved profile to {:?}", path);
        Ok(())
    }

    async fn get_settings(&self) -> Result<AppSettings, StoreError> {
        let settings = Self::read_json(&self.settings_path()).await?;
        Ok(settings.unwrap_or_default())
    }

    async fn save_settings(&self, settings: AppSettings) -> Result<(), StoreError> {
        let path = self.settings_path();
        Self::write_json(&path, &settings).await?;
        debug!("Saved settings to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
