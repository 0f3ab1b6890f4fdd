use super::*;
use formpilot_protocols::Education;
use tempfile::TempDir;

#[tokio::test]
async fn test_file_store_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b");
    let store = FileProfileStore::new(&nested).await.unwrap();
    assert!(nested.is_dir());
    assert_eq!(store.storage_path(), nested.as_path());
}

#[tokio::test]
async fn test_file_store_missing_files_return_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileProfileStore::new(temp_dir.path()).await.unwrap();

    let profile = store.get_profile().await.unwrap();
    assert_eq!(profile.legal.citizenship_status, "Foreign National");
    let settings = store.get_settings().await.unwrap();
    assert_eq!(settings.model, "gpt-4o-mini");
    assert!(!store.profile_path().exists());
}

#[tokio::test]
async fn test_file_store_save_and_get_profile() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileProfileStore::new(temp_dir.path()).await.unwrap();

    let mut profile = Profile::placeholder();
    profile.meta.last_updated = 1;
    profile.basics.first_name = "Ada".to_string();
    profile
        .education
        .push(Education::new("UC San Diego", "MS", "Computer Science"));
    store.save_profile(profile).await.unwrap();

    let loaded = store.get_profile().await.unwrap();
    assert_eq!(loaded.basics.first_name, "Ada");
    assert_eq!(loaded.education.len(), 1);
    assert!(loaded.meta.last_updated > 1);

    let raw = std::fs::read_to_string(store.profile_path()).unwrap();
    assert!(raw.contains("\"schoolName\": \"UC San Diego\""));
    assert!(!temp_dir.path().join("profile.json.tmp").exists());
}

#[tokio::test]
async fn test_file_store_save_and_get_settings() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileProfileStore::new(temp_dir.path()).await.unwrap();

    let settings = AppSettings {
        language: "zh".to_string(),
        auto_submit: true,
        ..Default::default()
    };
    store.save_settings(settings.clone()).await.unwrap();
    assert_eq!(store.get_settings().await.unwrap(), settings);
}

#[tokio::test]
async fn test_file_store_corrupt_profile_is_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileProfileStore::new(temp_dir.path()).await.unwrap();
    std::fs::write(store.profile_path(), "{ not json").unwrap();

    let result = store.get_profile().await;
    assert!(matches!(result, Err(StoreError::SerializationError(_))));
}

#[tokio::test]
async fn test_file_store_reads_external_camel_case() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileProfileStore::new(temp_dir.path()).await.unwrap();
    std::fs::write(
        store.profile_path(),
        r#"{"basics":{"firstName":"Lin","location":{"zipCode":"10001"}},
            "preferences":{"salary":{"expected":120000,"currency":"USD"}}}"#,
    )
    .unwrap();

    let profile = store.get_profile().await.unwrap();
    assert_eq!(profile.basics.first_name, "Lin");
    assert_eq!(profile.basics.location.zip_code, "10001");
    assert_eq!(profile.preferences.salary.expected, 120000.0);
}
