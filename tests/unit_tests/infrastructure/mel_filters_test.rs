use transcription_api::infrastructure::audio::{hz_to_mel, mel_filter_bank, mel_to_hz};

#[test]
fn given_frequencies_when_converting_to_mel_and_back_then_round_trips() {
    for hz in [0.0, 440.0, 999.0, 1000.0, 4000.0, 8000.0] {
        let back = mel_to_hz(hz_to_mel(hz));
        assert!((back - hz).abs() < 1e-6, "{} -> {}", hz, back);
    }
}

#[test]
fn given_whisper_parameters_when_building_bank_then_has_expected_shape() {
    let filters = mel_filter_bank(80, 400, 16_000);
    assert_eq!(filters.len(), 80 * 201);

    let large = mel_filter_bank(128, 400, 16_000);
    assert_eq!(large.len(), 128 * 201);
}

#[test]
fn given_filter_bank_when_inspected_then_weights_non_negative_and_each_row_active() {
    let filters = mel_filter_bank(80, 400, 16_000);

    assert!(filters.iter().all(|w| *w >= 0.0));
    for row in filters.chunks(201) {
        assert!(row.iter().any(|w| *w > 0.0));
    }
}
