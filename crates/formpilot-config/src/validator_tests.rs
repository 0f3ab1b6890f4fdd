use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_zero_tick_interval() {
    let mut config = Config::default();
    config.agent.tick_interval_ms = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(
        result
            .errors
            .iter()
            .any(|e| e.path == "agent.tick_interval_ms")
    );
}

#[test]
fn test_validate_fast_tick_warning() {
    let mut config = Config::default();
    config.agent.tick_interval_ms = 50;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.path == "agent.tick_interval_ms")
    );
}

#[test]
fn test_validate_settle_order_warning() {
    let mut config = Config::default();
    config.agent.navigation_settle_ms = 100;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(
        result
            .warnings
            .iter()
            .any(|w| w.path == "agent.navigation_settle_ms")
    );
}

#[test]
fn test_validate_scanner_errors() {
    let mut config = Config::default();
    config.scanner.max_label_len = 0;
    config.scanner.min_control_size = -1.0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_validate_empty_store_dir() {
    let mut config = Config::default();
    config.store.dir = "  ".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "store.dir"));
}

#[test]
fn test_validate_log_level() {
    let mut config = Config::default();
    config.logging.level = "verbose".to_string();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.warnings.iter().any(|w| w.path == "logging.level"));

    config.logging.level = "formpilot_runloop=debug".to_string();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_log_dir_without_file() {
    let mut config = Config::default();
    config.logging.dir = Some("/tmp/logs".to_string());
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "logging.dir"));
}
