//! Terminal rendering of label fields, session state, and session events.

use std::fmt::Write as _;

use carton_label_core::{Field, Flag, LabelFields, SessionEvent, SessionSettings, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// How one-shot command results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Aligned `caption: value` lines.
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    pub(crate) fn from_json_flag(json: bool) -> Self {
        if json { Format::Json } else { Format::Pretty }
    }
}

// ── Fields ──────────────────────────────────────────────────────────────

const CAPTION_WIDTH: usize = 19;

fn push_row(out: &mut String, caption: &str, value: &str) {
    let _ = writeln!(out, "{:<CAPTION_WIDTH$} {value}", format!("{caption}:"));
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// The eight text fields in label order.
pub(crate) fn field_lines(fields: &LabelFields) -> String {
    let mut out = String::new();
    for field in Field::ALL {
        push_row(&mut out, field.caption(), fields.get(field));
    }
    out
}

/// Fields, flags, and operator settings.
pub(crate) fn session_lines(fields: &LabelFields, settings: &SessionSettings) -> String {
    let mut out = field_lines(fields);
    for flag in [Flag::PrintToPdf, Flag::AutoWeight, Flag::ShowTotalWeight] {
        push_row(&mut out, &flag.to_string(), on_off(fields.flag(flag)));
    }
    push_row(&mut out, "Printer", &settings.printer_address);
    push_row(
        &mut out,
        "Scale port",
        settings.scale_port.as_deref().unwrap_or("Select Port"),
    );
    let folder = settings
        .pdf_folder
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    push_row(&mut out, "PDF folder", &folder);
    out
}

/// Fields in the requested format.
pub(crate) fn render_fields(fields: &LabelFields, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Pretty => field_lines(fields),
        Format::Json => format!("{}\n", serde_json::to_string_pretty(fields)?),
    })
}

// ── Events ──────────────────────────────────────────────────────────────

/// The operator-facing line for an event, if it has one.
pub(crate) fn event_line(event: &SessionEvent) -> Option<String> {
    match event {
        SessionEvent::Notice {
            severity: Severity::Info,
            message,
        } => Some(format!("info: {message}")),
        SessionEvent::Notice {
            severity: Severity::Error,
            message,
        } => Some(format!("error: {message}")),
        SessionEvent::WeightRead { weight } => Some(format!("weight: {weight}")),
        SessionEvent::PortSelected { port } => Some(format!("scale port: {port}")),
        _ => None,
    }
}
