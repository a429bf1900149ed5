//! ZPL rendering for network label printers.
//!
//! Field data is emitted under `^FH` so that the ZPL control characters
//! `^` and `~`, and the `_` indicator itself, survive as `_XX` escapes.
//! Text is sent as UTF-8 (`^CI28`).

use std::fmt::Write as _;

use carton_label_core::{LabelFields, OutputError};

use crate::barcode::barcode_text;
use crate::layout::{LabelLayout, label_lines};

/// The `^FH` escape indicator.
const INDICATOR: char = '_';

/// Escape `^`, `~`, and `_` as `_XX` hex pairs for `^FH` field data.
pub fn escape_field_data(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '^' | '~' | INDICATOR => {
                let _ = write!(out, "{INDICATOR}{:02X}", c as u32);
            }
            // Line breaks have no meaning inside a single field.
            '\r' | '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out
}

/// Render the label as one `^XA … ^XZ` format.
pub fn render_zpl(fields: &LabelFields, layout: &LabelLayout) -> Result<String, OutputError> {
    let barcode = barcode_text(fields)?;

    let margin = layout.dots(0.2);
    let font = layout.dots(0.16).max(10);
    let step = font + font / 2;
    let bar_height = layout.dots(0.6);

    let mut zpl = String::new();
    let mut emit = |line: String| {
        zpl.push_str(&line);
        zpl.push('\n');
    };

    emit("^XA".into());
    emit("^CI28".into());
    emit(format!("^PW{}", layout.width_dots()));
    emit(format!("^LL{}", layout.height_dots()));

    let mut y = margin;
    for line in label_lines(fields) {
        emit(format!(
            "^FO{margin},{y}^A0N,{font},{font}^FH^FD{}: {}^FS",
            escape_field_data(line.caption),
            escape_field_data(&line.value)
        ));
        y += step;
    }

    y += step / 2;
    emit("^BY3,3".into());
    emit(format!(
        "^FO{margin},{y}^BCN,{bar_height},Y,N,N^FH^FD{}^FS",
        escape_field_data(barcode)
    ));
    emit("^XZ".into());

    Ok(zpl)
}
