use log::LevelFilter;
use sundial::config::LoggingConfig;
use sundial::logger;

#[test]
fn test_parse_level() {
    assert_eq!(logger::parse_level("WARN").unwrap(), LevelFilter::Warn);
    assert_eq!(logger::parse_level(" debug ").unwrap(), LevelFilter::Debug);
    assert!(logger::parse_level("loud").is_err());
}

#[test]
fn test_init_installs_once() {
    // Disabled config installs nothing
    let disabled = LoggingConfig::default();
    assert!(logger::init(&disabled).is_ok());
    assert_eq!(logger::installed_level(), None);

    let enabled = LoggingConfig {
        enabled: true,
        level: "debug".to_string(),
    };
    assert!(logger::init(&enabled).is_ok());
    assert_eq!(logger::installed_level(), Some(LevelFilter::Debug));

    // A second init keeps the first level
    let other = LoggingConfig {
        enabled: true,
        level: "error".to_string(),
    };
    assert!(logger::init(&other).is_ok());
    assert_eq!(logger::installed_level(), Some(LevelFilter::Debug));

    log::debug!("logger test message");
}
