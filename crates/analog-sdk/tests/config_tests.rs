//! Config file round trips.

use analog_keycodes::KeyCodeMode;
use analog_sdk::{ConfigError, SdkConfig};

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[test]
fn test_save_then_load() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("sdk.json");
    let config = SdkConfig {
        library_path: Some("/opt/wooting/libwooting_analog_wrapper.so".into()),
        keycode_mode: KeyCodeMode::VirtualKey,
        device_capacity: 4,
    };

    config.save(&path)?;
    assert_eq!(SdkConfig::load(&path)?, config);
    Ok(())
}

#[test]
fn test_load_missing_file() {
    let result = SdkConfig::load(std::path::Path::new("/nonexistent/analog/sdk.json"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_load_malformed_file() -> TestResult {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sdk.json");
    std::fs::write(&path, "{ not json")?;
    assert!(matches!(
        SdkConfig::load(&path),
        Err(ConfigError::Parse { .. })
    ));
    Ok(())
}

#[test]
fn test_resolve_without_file_uses_defaults() -> TestResult {
    let config = SdkConfig::resolve(None)?;
    assert_eq!(config.device_capacity, SdkConfig::default().device_capacity);
    Ok(())
}
