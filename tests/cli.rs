use std::fs;
use std::process::Command;

fn interpolate() -> Command {
    Command::new(env!("CARGO_BIN_EXE_interpolate"))
}

#[test]
fn streams_the_fixture_to_stdout() {
    let output = interpolate().arg("tests/fixtures/matrix.csv").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        fs::read_to_string("tests/fixtures/matrix_expected.csv").unwrap()
    );
}

#[test]
fn missing_argument_is_a_usage_error() {
    let output = interpolate().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn unreadable_file_exits_non_zero() {
    let output = interpolate().arg("tests/fixtures/does_not_exist.csv").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("io error"));
}
