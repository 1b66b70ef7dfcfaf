//! Integration tests for the quality analyzer.
//!
//! Exercises the full pipeline on synthesized signals with known
//! distortion content.

use senal_analysis::{
    LiveEngineSpectrum, QualityAnalyzer, QualityTier, generate_test_tone,
};
use std::f32::consts::PI;

const SAMPLE_RATE: f32 = 48000.0;

fn tone_with_harmonic(freq: f32, amplitude: f32, harmonic_ratio: f32, secs: f32) -> Vec<f32> {
    let n = (secs * SAMPLE_RATE) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            amplitude * (2.0 * PI * freq * t).sin()
                + amplitude * harmonic_ratio * (2.0 * PI * freq * 2.0 * t).sin()
        })
        .collect()
}

#[test]
fn pure_sine_has_negligible_thd() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();
    let tone = generate_test_tone(SAMPLE_RATE, 1000.0, 1.0, 0.5);

    let report = analyzer.analyze(&tone).unwrap();

    assert!(
        report.thd_percent < 0.5,
        "pure sine THD should be ~0, got {}%",
        report.thd_percent
    );
    assert!(
        (report.fundamental_hz - 1000.0).abs() < 25.0,
        "detected {} Hz",
        report.fundamental_hz
    );
}

#[test]
fn ten_percent_second_harmonic_measures_ten_percent_thd() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();
    let signal = tone_with_harmonic(1000.0, 0.5, 0.1, 1.0);

    let report = analyzer.analyze(&signal).unwrap();

    assert!(
        (report.thd_percent - 10.0).abs() < 1.0,
        "expected ~10% THD, got {}%",
        report.thd_percent
    );
}

#[test]
fn clipping_degrades_the_tier() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();

    let clean = generate_test_tone(SAMPLE_RATE, 1000.0, 1.0, 0.5);
    let mut clipped = generate_test_tone(SAMPLE_RATE, 1000.0, 1.0, 1.0);
    for s in clipped.iter_mut() {
        *s = s.clamp(-0.5, 0.5);
    }

    let clean_report = analyzer.analyze(&clean).unwrap();
    let clipped_report = analyzer.analyze(&clipped).unwrap();

    assert!(
        clipped_report.thd_percent > 10.0,
        "hard clipping should show heavy THD, got {}%",
        clipped_report.thd_percent
    );
    assert!(clipped_report.thd_percent > clean_report.thd_percent * 10.0);
    assert_eq!(clipped_report.tier(), QualityTier::Poor);
}

#[test]
fn harmonic_levels_track_signal_content() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();
    let signal = tone_with_harmonic(1000.0, 0.5, 0.1, 1.0);

    let report = analyzer.analyze(&signal).unwrap();

    // Fundamental bin carries A/2 = 0.25 -> ~-12 dB
    assert!((report.harmonic_levels_db[0] - (-12.0)).abs() < 0.5);
    // Second harmonic is 20 dB below the fundamental
    let drop = report.harmonic_levels_db[0] - report.harmonic_levels_db[1];
    assert!((drop - 20.0).abs() < 1.0, "harmonic drop {drop} dB");
}

#[test]
fn known_fundamental_bypasses_detection() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();

    // 3 kHz sits above the detector's 50-2000 Hz search range, so the
    // autocorrelation path locks onto a subharmonic
    let tone = generate_test_tone(SAMPLE_RATE, 3000.0, 0.5, 0.5);
    let detected = analyzer.analyze(&tone).unwrap();
    assert!(
        detected.fundamental_hz <= 2000.0,
        "expected a subharmonic lock, got {} Hz",
        detected.fundamental_hz
    );

    // Supplying the fundamental skips detection and measures correctly
    let known = analyzer.analyze_with_fundamental(&tone, 3000.0).unwrap();
    assert_eq!(known.fundamental_hz, 3000.0);
    assert!(
        known.thd_percent < 0.5,
        "pure 3 kHz sine THD should be ~0, got {}%",
        known.thd_percent
    );
    assert!((known.harmonic_levels_db[0] - (-12.0)).abs() < 0.5);
}

#[test]
fn known_fundamental_matches_detection_for_in_range_tones() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();
    let tone = generate_test_tone(SAMPLE_RATE, 1000.0, 0.5, 0.5);

    // 1 kHz is inside the search range and lag-exact, so both paths
    // agree bin for bin
    let detected = analyzer.analyze(&tone).unwrap();
    let known = analyzer.analyze_with_fundamental(&tone, 1000.0).unwrap();
    assert_eq!(detected, known);
}

#[test]
fn silence_produces_floor_report() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();
    let report = analyzer.analyze(&[0.0; 8192]).unwrap();

    assert_eq!(report.noise_floor_db, -120.0);
    assert_eq!(report.peak_db, -120.0);
    assert_eq!(report.rms_db, -120.0);
    assert_eq!(report.thd_percent, 0.0);
    assert_eq!(report.dynamic_range_db, 0.0);
}

#[test]
fn usable_live_spectrum_sets_the_noise_floor() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();
    let tone = generate_test_tone(SAMPLE_RATE, 1000.0, 0.5, 0.5);

    // A flat engine spectrum at 0.1 per bin puts the floor at -20 dB
    let live = LiveEngineSpectrum::new(vec![0.1; 4096], 8192);
    let report = analyzer.analyze_with_live(&tone, &live).unwrap();

    assert!(
        (report.noise_floor_db - (-20.0)).abs() < 0.5,
        "noise floor {} dB",
        report.noise_floor_db
    );
}

#[test]
fn unusable_live_spectrum_falls_back_to_offline() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();
    let tone = generate_test_tone(SAMPLE_RATE, 1000.0, 0.5, 0.5);

    let dead = LiveEngineSpectrum::new(vec![0.0; 4096], 8192);
    let with_dead_live = analyzer.analyze_with_live(&tone, &dead).unwrap();
    let offline = analyzer.analyze(&tone).unwrap();

    assert_eq!(with_dead_live, offline);
}

#[test]
fn dynamic_range_is_peak_over_noise_floor() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE).unwrap();
    let tone = generate_test_tone(SAMPLE_RATE, 1000.0, 1.0, 0.5);

    let report = analyzer.analyze(&tone).unwrap();
    let expected = report.peak_db - report.noise_floor_db;
    assert!((report.dynamic_range_db - expected).abs() < 1e-4);
}

#[test]
fn fewer_harmonics_requested_fewer_reported() {
    let analyzer = QualityAnalyzer::new(SAMPLE_RATE)
        .unwrap()
        .with_max_harmonics(3);
    let tone = generate_test_tone(SAMPLE_RATE, 1000.0, 0.5, 0.5);

    let report = analyzer.analyze(&tone).unwrap();
    assert_eq!(report.harmonic_levels_db.len(), 3);
}
