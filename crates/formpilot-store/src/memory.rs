//! In-memory profile store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use formpilot_protocols::{AppSettings, Profile, ProfileStore, StoreError};

/// In-memory profile store for testing and embedding.
#[derive(Default)]
pub struct MemoryProfileStore {
    profile: RwLock<Option<Profile>>,
    settings: RwLock<Option<AppSettings>>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `profile`.
    pub fn with_profile(profile: Profile) -> Self {
        Self {
            profile: RwLock::new(Some(profile)),
            settings: RwLock::new(None),
        }
    }

    pub fn with_settings(self, settings: AppSettings) -> Self {
        Self {
            profile: self.profile,
            settings: RwLock::new(Some(settings)),
        }
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn get_profile(&self) -> Result<Profile, StoreError> {
        let profile = self.profile.read().await;
        Ok(profile.clone().unwrap_or_else(Profile::placeholder))
    }

    async fn save_profile(&self, mut profile: Profile) -> Result<(), StoreError> {
        profile.touch();
        *self.profile.write().await = Some(profile);
        Ok(())
    }

    async fn get_settings(&self) -> Result<AppSettings, StoreError> {
        let settings = self.settings.read().await;
        Ok(settings.clone().unwrap_or_default())
    }

    async fn save_settings(&self, settings: AppSettings) -> Result<(), StoreError> {
        *self.settings.write().await = Some(settings);
        Ok(())
    }
}
