//! CLI tests for `carton-label print`.

mod common;

use std::io::Read;
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

use common::{carton_cmd, sample_orders};

#[test]
fn print_help_shows_flags() {
    let dir = tempfile::tempdir().unwrap();
    let output = carton_cmd(dir.path())
        .args(["print", "--help"])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--pdf-dir",
        "--printer",
        "--weight",
        "--auto-weight",
        "--port",
        "--show-total-weight",
        "--dry-run",
    ] {
        assert!(stdout.contains(flag), "missing {flag} in help");
    }
}

#[test]
fn dry_run_prints_zpl() {
    let dir = tempfile::tempdir().unwrap();
    let orders = sample_orders(dir.path());

    let output = carton_cmd(dir.path())
        .arg("print")
        .arg(&orders)
        .args(["SO200", "--dry-run", "--show-total-weight"])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "dry-run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let zpl = String::from_utf8_lossy(&output.stdout);
    assert!(zpl.starts_with("^XA\n"));
    assert!(zpl.ends_with("^XZ\n"));
    assert!(zpl.contains("^FDSO Number: SO200^FS"));
    assert!(zpl.contains("^FDCustomer: Beta_5ECo^FS"));
    assert!(zpl.contains("^FDTotal Weight: 6^FS"));
}

#[test]
fn manual_weight_overrides_spreadsheet() {
    let dir = tempfile::tempdir().unwrap();
    let orders = sample_orders(dir.path());

    let output = carton_cmd(dir.path())
        .arg("print")
        .arg(&orders)
        .args(["SO100", "--dry-run", "--weight", "13.75"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let zpl = String::from_utf8_lossy(&output.stdout);
    assert!(zpl.contains("^FDWeight: 13.75^FS"));
}

#[test]
fn pdf_written_to_folder() {
    let dir = tempfile::tempdir().unwrap();
    let orders = sample_orders(dir.path());
    let labels = dir.path().join("labels");
    std::fs::create_dir(&labels).unwrap();

    let output = carton_cmd(dir.path())
        .arg("print")
        .arg(&orders)
        .arg("SO100")
        .arg("--pdf-dir")
        .arg(&labels)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "print failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let pdf = std::fs::read(labels.join("SO100.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Label sent to PDF"), "got: {stdout}");
}

#[test]
fn zpl_sent_to_network_printer() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap().to_string();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream
            .set_read_timeout(Some(Duration::from_secs(10)))
            .unwrap();
        let mut received = Vec::new();
        let _ = stream.read_to_end(&mut received);
        received
    });

    let dir = tempfile::tempdir().unwrap();
    let orders = sample_orders(dir.path());
    let output = carton_cmd(dir.path())
        .arg("print")
        .arg(&orders)
        .args(["SO100", "--printer", &addr])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "print failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let received = String::from_utf8(server.join().unwrap()).unwrap();
    assert!(received.starts_with("^XA"));
    assert!(received.contains("^FDJob Number: J1^FS"));
    assert!(received.contains("^BCN"));
}

#[test]
fn unreachable_printer_fails() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().to_string()
    };
    let dir = tempfile::tempdir().unwrap();
    let orders = sample_orders(dir.path());

    let output = carton_cmd(dir.path())
        .arg("print")
        .arg(&orders)
        .args(["SO100", "--printer", &addr])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("printer delivery failed"), "got: {stderr}");
}

#[test]
fn auto_weight_without_port_fails() {
    let dir = tempfile::tempdir().unwrap();
    let orders = sample_orders(dir.path());

    let output = carton_cmd(dir.path())
        .arg("print")
        .arg(&orders)
        .args(["SO100", "--auto-weight", "--printer", "127.0.0.1"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no scale port selected"), "got: {stderr}");
}

#[test]
fn printer_conflicts_with_pdf_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output = carton_cmd(dir.path())
        .args(["print", "orders.xlsx", "SO1", "--printer", "x", "--pdf-dir", "y"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn port_requires_auto_weight() {
    let dir = tempfile::tempdir().unwrap();
    let output = carton_cmd(dir.path())
        .args(["print", "orders.xlsx", "SO1", "--port", "/dev/ttyUSB0"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--auto-weight"), "got: {stderr}");
}
