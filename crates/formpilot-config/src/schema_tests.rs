use super::*;

#[test]
fn test_agent_config_default() {
    let config = AgentConfig::default();
    assert_eq!(config.tick_interval(), Duration::from_millis(1500));
    assert_eq!(config.fill_settle(), Duration::from_millis(100));
    assert_eq!(config.refill_settle(), Duration::from_millis(500));
    assert_eq!(config.navigation_settle(), Duration::from_secs(3));
    assert_eq!(config.click_settle(), Duration::from_millis(500));
    assert_eq!(config.max_ticks, 0);
}

#[test]
fn test_scanner_config_default() {
    let config = ScannerConfig::default();
    assert_eq!(config.min_control_size, 10.0);
    assert_eq!(config.min_clickable_size, 5.0);
    assert_eq!(config.max_label_len, 100);
    assert_eq!(config.button_label_len, 50);
    assert_eq!(config.ancestor_depth, 3);
    assert_eq!(config.sibling_depth, 2);
}

#[test]
fn test_store_dir_expanded() {
    let config = StoreConfig::default();
    assert_eq!(config.dir, "~/.formpilot");
    let resolved = config.resolved_dir();
    assert!(!resolved.to_string_lossy().starts_with('~'));
    assert!(resolved.ends_with(".formpilot"));
}

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, "info");
    assert!(!config.file);
    assert!(config.dir.is_none());
}

#[test]
fn test_config_deserialize_sections() {
    let config: Config = toml::from_str(
        r#"
        [logging]
        file = true
        dir = "/var/log/formpilot"
        "#,
    )
    .unwrap();
    assert!(config.logging.file);
    assert_eq!(config.logging.dir.as_deref(), Some("/var/log/formpilot"));
    assert_eq!(config.agent.tick_interval_ms, 1500);
}
