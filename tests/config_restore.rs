use std::fs;
use std::path::PathBuf;

use earfloor::config::LoudnessConfig;
use earfloor::core::loudness::LoudnessCompressor;

fn unique_path(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "earfloor_config_restore_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn assert_close(a: f32, b: f32, label: &str) {
    let diff = (a - b).abs();
    assert!(diff <= 1e-6, "{label} mismatch: {a} vs {b}");
}

fn assert_config_eq(actual: &LoudnessConfig, expected: &LoudnessConfig) {
    assert_close(actual.schwell_factor, expected.schwell_factor, "schwell_factor");
    assert_close(
        actual.compression_level,
        expected.compression_level,
        "compression_level",
    );
    assert_close(
        actual.hearing_threshold_phon,
        expected.hearing_threshold_phon,
        "hearing_threshold_phon",
    );
}

#[test]
fn missing_file_writes_defaults_and_reloads() {
    let path = unique_path("defaults");
    let path_str = path.to_str().unwrap();

    let first = LoudnessConfig::load_or_default(path_str);
    assert_config_eq(&first, &LoudnessConfig::default());
    assert!(path.exists(), "defaults were not written to {path_str}");

    let second = LoudnessConfig::load_or_default(path_str);
    assert_config_eq(&second, &first);

    fs::remove_file(&path).unwrap();
}

#[test]
fn custom_values_round_trip_through_toml() {
    let path = unique_path("custom");
    let path_str = path.to_str().unwrap();

    let custom = LoudnessConfig {
        schwell_factor: 0.6,
        compression_level: 0.05,
        hearing_threshold_phon: 10.0,
    };
    let text = toml::to_string_pretty(&custom).unwrap();
    fs::write(&path, text).unwrap();

    let restored = LoudnessConfig::load_or_default(path_str);
    assert_config_eq(&restored, &custom);

    fs::remove_file(&path).unwrap();
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let path = unique_path("malformed");
    let path_str = path.to_str().unwrap();
    fs::write(&path, "schwell_factor = \"not a number\"").unwrap();

    let cfg = LoudnessConfig::load_or_default(path_str);
    assert_config_eq(&cfg, &LoudnessConfig::default());

    fs::remove_file(&path).unwrap();
}

#[test]
fn compressor_builds_from_restored_config() {
    let path = unique_path("build");
    let path_str = path.to_str().unwrap();

    let cfg = LoudnessConfig::load_or_default(path_str);
    let comp = LoudnessCompressor::from_config(&cfg).unwrap();
    assert_close(comp.schwell_factor(), 0.5, "schwell_factor");
    assert_close(comp.hearing_threshold_phon(), 3.539, "hearing_threshold_phon");

    fs::remove_file(&path).unwrap();
}

#[test]
fn out_of_domain_threshold_in_config_is_rejected() {
    let cfg = LoudnessConfig {
        hearing_threshold_phon: 120.0,
        ..LoudnessConfig::default()
    };
    assert!(LoudnessCompressor::from_config(&cfg).is_err());
}
