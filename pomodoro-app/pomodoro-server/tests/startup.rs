// Server binary startup against an unreachable store.

use std::fs;
use std::process::Command;

#[test]
fn failed_store_init_exits_nonzero_and_flushes_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let logs = dir.path().join("logs");

    let output = Command::new(env!("CARGO_BIN_EXE_pomodoro-server"))
        .current_dir(dir.path())
        .env("APP_ENV", "test")
        .env("STORE__BACKEND", "postgres")
        .env("STORE__URL", "postgres://127.0.0.1:1/none")
        .env("STORE__CONNECT_TIMEOUT_SECS", "2")
        .env("LOG__DIRECTORY", &logs)
        .output()
        .unwrap();

    assert!(!output.status.success());

    let written: String = fs::read_dir(&logs)
        .unwrap()
        .map(|entry| fs::read_to_string(entry.unwrap().path()).unwrap())
        .collect();
    assert!(written.contains("Failed to initialize store"), "log file: {written}");
}
