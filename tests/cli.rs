use std::path::PathBuf;
use std::process::{Command, Output};

fn nbsim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_nbsim"))
        .args(args)
        .output()
        .expect("failed to start nbsim")
}

fn two_body() -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("scenarios")
        .join("two_body.txt")
        .to_string_lossy()
        .into_owned()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn assert_usage_only(out: &Output) {
    assert!(out.status.success(), "status {:?}", out.status);
    let text = stdout(out);
    assert!(text.starts_with("Usage : nbsim"), "stdout: {text:?}");
    assert!(!text.contains("Body"), "simulated anyway: {text:?}");
}

// ==================================================================================
// Argument count
// ==================================================================================

#[test]
fn no_arguments_prints_usage() {
    assert_usage_only(&nbsim(&[]));
}

#[test]
fn one_argument_prints_usage() {
    assert_usage_only(&nbsim(&[&two_body()]));
}

#[test]
fn extra_positional_prints_usage() {
    assert_usage_only(&nbsim(&[&two_body(), "2", "3"]));
}

#[test]
fn mistyped_flag_is_named_on_stderr() {
    let out = nbsim(&[&two_body(), "2", "--pol"]);
    assert_usage_only(&out);
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("--pol"), "stderr: {err:?}");
}

// ==================================================================================
// Worker count
// ==================================================================================

#[test]
fn bad_worker_counts_fail() {
    for count in ["abc", "0", "-3"] {
        let out = nbsim(&[&two_body(), count]);
        assert!(!out.status.success(), "worker count {count} accepted");
        assert!(!stdout(&out).contains("Body"), "worker count {count} simulated");
        let err = String::from_utf8_lossy(&out.stderr);
        assert!(err.contains("invalid configuration"), "worker count {count}: {err:?}");
    }
}

#[test]
fn missing_config_file_fails() {
    let out = nbsim(&["does/not/exist.txt", "2"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("exist.txt"));
}

// ==================================================================================
// Runs
// ==================================================================================

#[test]
fn two_body_run_reports_final_state() {
    for extra in [None, Some("--pool")] {
        let mut args = vec![two_body(), "2".to_string()];
        args.extend(extra.map(str::to_string));
        let out = nbsim(&args.iter().map(String::as_str).collect::<Vec<_>>());

        assert!(out.status.success(), "{extra:?}: {:?}", out.status);
        let text = stdout(&out);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Body 1 : 0.002500\t0.000000\t0.050000\t0.000000", "{extra:?}");
        assert_eq!(lines[1], "Body 2 : 0.997500\t0.000000\t-0.050000\t0.000000", "{extra:?}");
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("Time is : "), "{extra:?}: {text:?}");
    }
}
