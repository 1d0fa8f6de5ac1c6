//! Integration tests for parallel run settings

use std::io::Write;
use std::time::Duration;

use stresstest_runners::{ParallelRunConfig, RunInParallel, RunnerConfigError};

#[test]
fn test_empty_config_uses_defaults() {
    let config = ParallelRunConfig::from_str("").unwrap();
    assert_eq!(config.defaults, RunInParallel::default());
    assert!(config.methods.is_empty());
}

#[test]
fn test_type_level_settings() {
    let toml = r#"
[run_in_parallel]
random_start_delay_max = 50
num_threads = 20
"#;

    let config = ParallelRunConfig::from_str(toml).unwrap();
    assert_eq!(config.defaults.random_start_delay_max, 50);
    assert_eq!(config.defaults.num_threads, 20);
    assert_eq!(config.defaults.max_threads, 500);
    assert_eq!(config.defaults.max_start_delay(), Duration::from_millis(50));
}

#[test]
fn test_method_record_replaces_type_record() {
    let toml = r#"
[run_in_parallel]
random_start_delay_max = 50
num_threads = 20
max_threads = 40

[run_in_parallel.methods.insert_conflicting]
num_threads = 200
max_threads = 200
"#;

    let config = ParallelRunConfig::from_str(toml).unwrap();

    let method = config.for_method("insert_conflicting");
    assert_eq!(method.num_threads, 200);
    assert_eq!(method.max_threads, 200);
    // Not inherited from the type-level record
    assert_eq!(method.random_start_delay_max, 0);

    let other = config.for_method("lookup");
    assert_eq!(other.num_threads, 20);
    assert_eq!(other.max_threads, 40);
}

#[test]
fn test_invalid_settings_rejected() {
    let toml = r#"
[run_in_parallel]
num_threads = 20
max_threads = 5
"#;
    let err = ParallelRunConfig::from_str(toml).unwrap_err();
    assert!(matches!(err, RunnerConfigError::Validation(_)));

    // A method record with defaults for max_threads can still overflow it
    let toml = r#"
[run_in_parallel.methods.flood]
num_threads = 501
"#;
    let err = ParallelRunConfig::from_str(toml).unwrap_err();
    assert!(err.to_string().contains("flood"));
}

#[test]
fn test_wrong_value_type() {
    let toml = r#"
[run_in_parallel]
num_threads = "many"
"#;
    let err = ParallelRunConfig::from_str(toml).unwrap_err();
    assert!(matches!(err, RunnerConfigError::Parse(_)));
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[run_in_parallel]").unwrap();
    writeln!(file, "num_threads = 3").unwrap();

    let config = ParallelRunConfig::from_file(file.path()).unwrap();
    assert_eq!(config.defaults.num_threads, 3);

    let dir = tempfile::tempdir().unwrap();
    let err = ParallelRunConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(err, RunnerConfigError::Io(_)));
}
