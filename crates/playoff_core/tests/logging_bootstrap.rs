use playoff_core::{default_log_level, init_logging, logging_status};

// Logging init is process-global, so the whole lifecycle lives in one test.
#[test]
fn init_is_idempotent_and_rejects_conflicting_config() {
    let log_dir = tempfile::tempdir().unwrap();
    let other_dir = tempfile::tempdir().unwrap();
    let log_dir_str = log_dir.path().to_str().unwrap().to_string();
    let other_dir_str = other_dir.path().to_str().unwrap().to_string();

    assert!(logging_status().is_none());

    init_logging("info", &log_dir_str).unwrap();
    init_logging("info", &log_dir_str).unwrap();

    let level_err = init_logging("debug", &log_dir_str).unwrap_err();
    assert!(level_err.contains("refusing to switch"));

    let dir_err = init_logging("info", &other_dir_str).unwrap_err();
    assert!(dir_err.contains("refusing to switch"));

    let (level, dir) = logging_status().unwrap();
    assert_eq!(level, "info");
    assert_eq!(dir, log_dir.path());
}

#[test]
fn default_level_matches_build_mode() {
    let expected = if cfg!(debug_assertions) { "debug" } else { "info" };
    assert_eq!(default_log_level(), expected);
}
