use dota_teammates::{Config, DetailProviderKind, TeammateFinder, error::AppError};
use serial_test::serial;
use tempfile::tempdir;

#[tokio::test]
#[serial]
async fn test_saved_config_drives_finder() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let path = path.to_str().unwrap();

    let config = Config {
        tracked_account_id: 1234,
        stratz_token: Some("secret-token".to_string()),
        window_days: 7,
        ..Config::default()
    };
    config.save_to_path(path).await.unwrap();

    let loaded = Config::load_with_path(path).await.unwrap();
    assert_eq!(loaded.tracked_account_id, 1234);
    assert_eq!(loaded.window_days, 7);
    assert_eq!(loaded.detail_provider, DetailProviderKind::Stratz);

    let finder = TeammateFinder::from_config(loaded.clone()).unwrap();
    assert_eq!(finder.config(), &loaded);
}

#[tokio::test]
#[serial]
async fn test_stratz_without_token_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path = path.to_str().unwrap();
    tokio::fs::write(path, "tracked_account_id = 55\n").await.unwrap();
    // SAFETY: serialized with the other env-reading tests
    unsafe {
        std::env::remove_var("DOTA_TEAMMATES_STRATZ_TOKEN");
    }

    let result = Config::load_with_path(path).await;
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[tokio::test]
#[serial]
async fn test_opendota_provider_needs_no_token() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let path = path.to_str().unwrap();
    tokio::fs::write(path, "detail_provider = \"opendota\"\nwindow_days = 14\n")
        .await
        .unwrap();

    let config = Config::load_with_path(path).await.unwrap();
    assert_eq!(config.detail_provider, DetailProviderKind::OpenDota);
    assert_eq!(config.window_days, 14);
    assert_eq!(config.min_duration_seconds, 600);
}
