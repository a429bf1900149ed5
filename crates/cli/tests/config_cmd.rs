//! CLI tests for `carton-label config`.

mod common;

use common::carton_cmd;

#[test]
fn show_defaults_without_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = carton_cmd(dir.path())
        .args(["config", "show"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Printer address:  10.1.10.110"));
    assert!(stdout.contains("Scale port:       Select Port"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn init_writes_file_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let output = carton_cmd(dir.path())
        .args(["config", "init"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[printer]"));
    assert!(text.contains("address = \"10.1.10.110\""));

    let again = carton_cmd(dir.path())
        .args(["config", "init"])
        .output()
        .unwrap();
    assert_eq!(again.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&again.stderr).contains("--force"));

    let forced = carton_cmd(dir.path())
        .args(["config", "init", "--force"])
        .output()
        .unwrap();
    assert!(forced.status.success());
}

#[test]
fn configured_printer_is_used() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[printer]\naddress = \"192.168.5.5:6101\"\n",
    )
    .unwrap();

    let output = carton_cmd(dir.path())
        .args(["config", "show"])
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&output.stdout).contains("192.168.5.5:6101"));
}

#[test]
fn invalid_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[printer\n").unwrap();

    let output = carton_cmd(dir.path())
        .args(["config", "show"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid config"));
}
