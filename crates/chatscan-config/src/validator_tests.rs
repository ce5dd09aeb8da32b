use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_zero_target() {
    let mut config = Config::default();
    config.scan.target = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "scan.target"));
}

#[test]
fn test_validate_zero_target_unbounded_is_allowed() {
    let mut config = Config::default();
    config.scan.limit = false;
    config.scan.target = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
}

#[test]
fn test_validate_ratio_out_of_range() {
    for ratio in [0.0, -0.5, 1.01, f64::NAN] {
        let mut config = Config::default();
        config.scan.stabilization_ratio = ratio;

        let result = ConfigValidator::validate(&config);
        assert!(!result.is_valid(), "ratio {} accepted", ratio);
        assert!(result.errors.iter().any(|e| e.path == "scan.stabilization_ratio"));
    }
}

#[test]
fn test_validate_ratio_of_one_is_allowed() {
    let mut config = Config::default();
    config.scan.stabilization_ratio = 1.0;
    assert!(ConfigValidator::validate(&config).is_valid());
}

#[test]
fn test_validate_low_ratio_warning() {
    let mut config = Config::default();
    config.scan.stabilization_ratio = 0.3;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "scan.stabilization_ratio"));
}

#[test]
fn test_validate_zero_max_iterations() {
    let mut config = Config::default();
    config.scan.max_iterations = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "scan.max_iterations"));
}

#[test]
fn test_validate_high_max_iterations_warning() {
    let mut config = Config::default();
    config.scan.max_iterations = 50_000;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(!result.warnings.is_empty());
}

#[test]
fn test_validate_zero_call_timeout() {
    let mut config = Config::default();
    config.scan.call_timeout_secs = Some(0);

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "scan.call_timeout_secs"));
}

#[test]
fn test_validate_empty_log_level() {
    let mut config = Config::default();
    config.logging.level = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "logging.level"));
}

#[test]
fn test_into_result() {
    let mut config = Config::default();
    config.scan.target = 0;
    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(err.to_string().contains("scan.target"));

    let warnings = ConfigValidator::validate(&Config::default())
        .into_result()
        .unwrap();
    assert!(warnings.is_empty());
}

#[test]
fn test_multiple_errors_collected() {
    let mut config = Config::default();
    config.scan.target = 0;
    config.scan.max_iterations = 0;

    let result = ConfigValidator::validate(&config);
    assert_eq!(result.errors.len(), 2);
}
