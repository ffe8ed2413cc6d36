use transcription_api::domain::{Language, ValidationError};

#[test]
fn given_auto_when_parsed_then_has_no_code() {
    let language: Language = "auto".parse().unwrap();

    assert!(language.is_auto());
    assert_eq!(language.code(), None);
    assert_eq!(language.as_str(), "auto");
}

#[test]
fn given_supported_code_when_parsed_then_keeps_code() {
    let language: Language = "de".parse().unwrap();
    assert_eq!(language.code(), Some("de"));
}

#[test]
fn given_unknown_code_when_parsed_then_invalid_value_error() {
    let err = "klingon".parse::<Language>().unwrap_err();

    match err {
        ValidationError::InvalidValue { field, value, .. } => {
            assert_eq!(field, "language");
            assert_eq!(value, "klingon");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn given_default_language_when_created_then_auto() {
    assert_eq!(Language::default(), Language::AUTO);
}
