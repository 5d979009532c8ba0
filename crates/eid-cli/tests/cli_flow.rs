use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_eid"))
}

/// Command with a clean environment: no inherited EID_* settings, headless dialogs.
fn eid(args: &[&str]) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env_remove("EID_PKCS11_LIBRARY")
        .env_remove("EID_PLATFORM")
        .env_remove("EID_LOG")
        .env("EID_DIALOGS", "none")
        .env("NO_COLOR", "1")
        .args(args);
    cmd
}

fn run(args: &[&str]) -> Output {
    eid(args).output().expect("run eid")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_path_per_platform() {
    let darwin = run(&["path", "--platform", "darwin"]);
    assert!(darwin.status.success());
    assert_eq!(
        stdout(&darwin).trim(),
        "/Library/Belgium Identity Card/Pkcs11/libbeidpkcs11.dylib"
    );

    let win32 = run(&["path", "--platform", "win32"]);
    assert_eq!(stdout(&win32).trim(), "C:/Windows/System32/beidpkcs11.dll");

    let linux = run(&["path", "--platform", "linux"]);
    assert_eq!(stdout(&linux).trim(), "/usr/lib/libbeidpkcs11.so");
}

#[test]
fn test_path_from_env_and_json() {
    let output = eid(&["path", "--json"])
        .env("EID_PLATFORM", "darwin")
        .output()
        .expect("run eid");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(value["platform"], "darwin");
    assert_eq!(
        value["library"],
        "/Library/Belgium Identity Card/Pkcs11/libbeidpkcs11.dylib"
    );
}

#[test]
fn test_completions() {
    let output = run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("eid"));
}

#[test]
fn test_read_missing_library_exits_with_load_error() {
    let output = run(&["read", "--library", "/nonexistent/libbeidpkcs11.so"]);
    assert_eq!(output.status.code(), Some(3));

    let err = stderr(&output);
    assert!(err.contains("Loading library: /nonexistent/libbeidpkcs11.so"));
    assert!(err.contains("Failed to load PKCS#11 library at /nonexistent/libbeidpkcs11.so"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_read_is_the_default_command() {
    let output = run(&["--library", "/nonexistent/libbeidpkcs11.so"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_read_invalid_library_json() {
    let mut file = tempfile::Builder::new()
        .prefix("not-a-module")
        .suffix(".so")
        .tempfile()
        .expect("temp file");
    file.write_all(b"this is not a shared object")
        .expect("write temp file");
    let path = file.path().display().to_string();

    let output = run(&["--json", "--library", &path]);
    assert_eq!(output.status.code(), Some(3));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(value["library"], path.as_str());
    assert_eq!(value["error"]["kind"], "library_load_error");
}

#[test]
fn test_format_with_json_is_invalid_input() {
    let output = run(&["path", "--json", "--format", "plain"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("--format cannot be used with --json"));
}
