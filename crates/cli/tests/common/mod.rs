//! Shared fixtures for the CLI tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::cargo;
use rust_xlsxwriter::Workbook;

pub const HEADER: [&str; 8] = [
    "SO Number",
    "Job Number",
    "RBO",
    "Weight",
    "Item",
    "Order Qty",
    "PO Number",
    "Customer",
];

/// Write an order workbook with the standard header and `rows` below it.
/// Cells that parse as numbers are written as numbers.
pub fn write_orders(dir: &Path, rows: &[[&str; 8]]) -> PathBuf {
    let path = dir.join("orders.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (c, name) in HEADER.iter().enumerate() {
        sheet.write_string(0, c as u16, *name).unwrap();
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            let (r, c) = (r as u32 + 1, c as u16);
            match cell.parse::<f64>() {
                Ok(n) => sheet.write_number(r, c, n).unwrap(),
                Err(_) => sheet.write_string(r, c, *cell).unwrap(),
            };
        }
    }
    workbook.save(&path).unwrap();
    path
}

pub fn sample_orders(dir: &Path) -> PathBuf {
    write_orders(
        dir,
        &[
            ["SO100", "J1", "R1", "12.5", "Widget", "4", "PO9", "Acme"],
            ["SO100", "J2", "R2", "99", "Other", "1", "PO0", "Dup"],
            ["SO200", "J3", "R3", "3", "Gadget", "2", "PO7", "Beta^Co"],
        ],
    )
}

/// `carton-label` with a config path inside `dir` so the user's own
/// configuration never leaks into a test.
pub fn carton_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("carton-label"));
    cmd.arg("--config").arg(dir.join("config.toml"));
    cmd.env_remove("RUST_LOG");
    cmd
}
