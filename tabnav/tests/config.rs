use std::time::Duration;

use tabnav::TabsConfig;

#[test]
fn test_defaults() {
    let config = TabsConfig::default();
    assert_eq!(config.scroll_tolerance, 1.0);
    assert_eq!(config.scroll_step_fraction, 0.8);
    assert_eq!(config.active_class_duration(), Duration::from_millis(300));
    assert_eq!(config.smooth_scroll_duration(), Duration::from_millis(300));
    assert_eq!(config.scroll_settle_delay(), Duration::from_millis(350));
    assert_eq!(config.accordion_transition(), Duration::from_millis(300));
    assert_eq!(config.frame_interval(), Duration::from_millis(16));
    assert!(!config.reduced_motion);
    assert_eq!(config.notification_log_limit, 256);
}

#[test]
fn test_partial_json_fills_defaults() {
    let config: TabsConfig =
        serde_json::from_str(r#"{ "scroll_step_fraction": 0.5, "accordion_duration_ms": 120 }"#).unwrap();

    assert_eq!(config.scroll_step_fraction, 0.5);
    assert_eq!(config.accordion_transition(), Duration::from_millis(120));
    assert_eq!(config.scroll_tolerance, 1.0);
    assert_eq!(config.line_height, 20.0);
}

#[test]
fn test_json_round_trip() {
    let config = TabsConfig::new().scroll_tolerance(2.0).reduced_motion();
    let json = serde_json::to_string(&config).unwrap();
    let back: TabsConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_reduced_motion_zeroes_transitions() {
    let config = TabsConfig::new().reduced_motion();
    assert_eq!(config.smooth_scroll_duration(), Duration::ZERO);
    assert_eq!(config.scroll_settle_delay(), Duration::ZERO);
    assert_eq!(config.accordion_transition(), Duration::ZERO);
    // The active-class flash is feedback, not motion.
    assert_eq!(config.active_class_duration(), Duration::from_millis(300));
}

#[test]
fn test_builders() {
    let config = TabsConfig::new()
        .scroll_step_fraction(0.5)
        .smooth_scroll(Duration::from_millis(100))
        .accordion_duration(Duration::from_millis(250));

    assert_eq!(config.scroll_step_fraction, 0.5);
    assert_eq!(config.smooth_scroll_duration(), Duration::from_millis(100));
    assert_eq!(config.accordion_transition(), Duration::from_millis(250));
}

#[test]
fn test_frame_interval_never_zero() {
    let config = TabsConfig {
        frame_interval_ms: 0,
        ..TabsConfig::default()
    };
    assert_eq!(config.frame_interval(), Duration::from_millis(1));
}

#[test]
fn test_text_metrics_follow_config() {
    let config = TabsConfig {
        char_width: 10.0,
        ..TabsConfig::default()
    };
    assert_eq!(config.text_metrics().char_width, 10.0);
    assert_eq!(config.text_metrics().line_height, 20.0);
}
