use transcription_api::domain::{ModelSize, ValidationError};

#[test]
fn given_every_model_when_round_tripping_name_then_parses_back() {
    for model in ModelSize::ALL {
        assert_eq!(model.as_str().parse::<ModelSize>(), Ok(model));
    }
}

#[test]
fn given_english_only_model_when_checked_then_reports_english_only() {
    assert!(ModelSize::BaseEn.is_english_only());
    assert!(!ModelSize::LargeV3.is_english_only());
}

#[test]
fn given_model_when_resolving_repo_then_uses_openai_namespace() {
    assert_eq!(ModelSize::Small.hf_repo(), "openai/whisper-small");
    assert_eq!(ModelSize::LargeV3.hf_repo(), "openai/whisper-large-v3");
    assert_eq!(ModelSize::LargeV1.hf_repo(), "openai/whisper-large");
}

#[test]
fn given_comma_separated_list_when_parsed_then_skips_blanks() {
    let models = ModelSize::parse_list(" small, ,large-v3,").unwrap();
    assert_eq!(models, vec![ModelSize::Small, ModelSize::LargeV3]);
}

#[test]
fn given_list_with_unknown_model_when_parsed_then_fails() {
    let err = ModelSize::parse_list("small,huge").unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidValue {
            field: "model_size",
            ..
        }
    ));
}
