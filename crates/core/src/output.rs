//! Label delivery seam: where a rendered label goes.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::OutputError;
use crate::fields::LabelFields;

/// Where a label is delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Destination {
    /// A network printer address (`IP[:PORT]` or hostname).
    Printer(String),
    /// A PDF file path.
    PdfFile(PathBuf),
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Printer(addr) => write!(f, "printer {addr}"),
            Destination::PdfFile(path) => write!(f, "PDF {}", path.display()),
        }
    }
}

/// A successfully delivered label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Delivery {
    /// Where the label went.
    pub destination: Destination,
    /// Size of the rendered document in bytes.
    pub bytes: usize,
}

/// Renders the label fields and delivers the result.
pub trait LabelSink {
    /// Render `fields` and send them to `destination`.
    fn deliver(
        &mut self,
        fields: &LabelFields,
        destination: &Destination,
    ) -> Result<Delivery, OutputError>;
}

/// File name for a label PDF: the SO number with unsafe characters replaced.
pub fn pdf_file_name(so_number: &str) -> String {
    let stem: String = so_number
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = stem.trim_start_matches('.');
    if stem.is_empty() {
        "label.pdf".to_string()
    } else {
        format!("{stem}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_names() {
        assert_eq!(pdf_file_name("SO100"), "SO100.pdf");
        assert_eq!(pdf_file_name(" SO 100/2 "), "SO_100_2.pdf");
        assert_eq!(pdf_file_name(""), "label.pdf");
        assert_eq!(pdf_file_name(".."), "label.pdf");
    }

    #[test]
    fn destination_display() {
        assert_eq!(
            Destination::Printer("10.1.10.110".into()).to_string(),
            "printer 10.1.10.110"
        );
    }
}
