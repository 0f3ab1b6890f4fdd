//! Profile subcommand handlers.

use tracing::info;

use formpilot_config::Config;
use formpilot_protocols::{AppSettings, Profile, ProfileStore};
use formpilot_store::FileProfileStore;

use crate::cli::ProfileAction;

/// Open the file store configured under `[store]`.
pub(crate) async fn open_store(config: &Config) -> Result<FileProfileStore, Box<dyn std::error::Error>> {
    Ok(FileProfileStore::new(config.store.resolved_dir()).await?)
}

/// Handle profile subcommands.
pub(crate) async fn handle_profile_command(
    config: &Config,
    action: ProfileAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(config).await?;
    match action {
        ProfileAction::Show => profile_show(&store).await,
        ProfileAction::Init { force } => profile_init(&store, force).await,
    }
}

async fn profile_show(store: &FileProfileStore) -> Result<(), Box<dyn std::error::Error>> {
    if !store.profile_path().exists() {
        println!(
            "No profile at {} (showing placeholder). Run `formpilot profile init` to create one.",
            store.profile_path().display()
        );
    }
    let profile = store.get_profile().await?;
    let settings = store.get_settings().await?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    println!("\nSettings:");
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

async fn profile_init(store: &FileProfileStore, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = store.profile_path();
    if path.exists() && !force {
        println!("Profile already exists at {}", path.display());
        println!("Use --force to overwrite it.");
        return Ok(());
    }
    store.save_profile(Profile::placeholder()).await?;
    if !store.settings_path().exists() {
        store.save_settings(AppSettings::default()).await?;
    }
    info!(path = %path.display(), "Profile initialized");
    println!("Profile written to {}", path.display());
    println!("Edit it to add your details.");
    Ok(())
}
