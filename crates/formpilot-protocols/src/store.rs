//! Profile store protocol.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::profile::Profile;
use crate::settings::AppSettings;

/// Persistence collaborator for the profile and the app settings.
///
/// Getters never report "missing": a store with nothing saved returns
/// [`Profile::placeholder`] and [`AppSettings::default`].
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self) -> Result<Profile, StoreError>;

    /// Save the profile, stamping `meta.last_updated`.
    async fn save_profile(&self, profile: Profile) -> Result<(), StoreError>;

    async fn get_settings(&self) -> Result<AppSettings, StoreError>;

    async fn save_settings(&self, settings: AppSettings) -> Result<(), StoreError>;
}
