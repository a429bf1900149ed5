//! CLI tests for `carton-label lookup`.

mod common;

use common::{carton_cmd, sample_orders};

#[test]
fn lookup_prints_populated_fields() {
    let dir = tempfile::tempdir().unwrap();
    let orders = sample_orders(dir.path());

    let output = carton_cmd(dir.path())
        .arg("lookup")
        .arg(&orders)
        .arg("SO100")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "lookup failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Job Number:         J1\n"), "got: {stdout}");
    assert!(stdout.contains("Weight:             12.5\n"), "got: {stdout}");
    assert!(stdout.contains("Order Qty:          4\n"), "got: {stdout}");
    assert!(!stdout.contains("Dup"), "duplicate row leaked: {stdout}");
}

#[test]
fn lookup_json_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    let orders = sample_orders(dir.path());

    let output = carton_cmd(dir.path())
        .arg("lookup")
        .arg(&orders)
        .args(["SO200", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["so_number"], "SO200");
    assert_eq!(json["customer"], "Beta^Co");
    assert_eq!(json["order_qty"], "2");
    assert_eq!(json["print_to_pdf"], false);
}

#[test]
fn unknown_so_number_fails() {
    let dir = tempfile::tempdir().unwrap();
    let orders = sample_orders(dir.path());

    let output = carton_cmd(dir.path())
        .arg("lookup")
        .arg(&orders)
        .arg("SO999")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("SO Number 'SO999' not found"),
        "got: {stderr}"
    );
}

#[test]
fn unreadable_spreadsheet_fails() {
    let dir = tempfile::tempdir().unwrap();
    let bogus = dir.path().join("orders.xlsx");
    std::fs::write(&bogus, "not a workbook").unwrap();

    let output = carton_cmd(dir.path())
        .arg("lookup")
        .arg(&bogus)
        .arg("SO100")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("loading the order data"),
        "got: {stderr}"
    );
}

#[test]
fn missing_arguments_are_usage_errors() {
    let dir = tempfile::tempdir().unwrap();
    let output = carton_cmd(dir.path()).arg("lookup").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}
