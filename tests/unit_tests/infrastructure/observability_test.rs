use transcription_api::infrastructure::observability::{REQUEST_ID_HEADER, TracingConfig};

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_default_config_when_created_then_filter_targets_this_crate() {
    let config = TracingConfig::default();

    assert!(!config.environment.is_empty());
    assert!(config.default_filter.contains("transcription_api"));
}
