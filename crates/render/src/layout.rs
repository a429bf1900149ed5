//! Label geometry and the ordered text lines printed on every label.

use carton_label_core::{Field, LabelFields, LabelSection};

/// Physical label size and printer resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    /// Width in inches.
    pub width_in: f64,
    /// Height in inches.
    pub height_in: f64,
    /// Dots per inch.
    pub dpi: u32,
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self::from(&LabelSection::default())
    }
}

impl From<&LabelSection> for LabelLayout {
    fn from(section: &LabelSection) -> Self {
        Self {
            width_in: section.width_in,
            height_in: section.height_in,
            dpi: section.dpi,
        }
    }
}

impl LabelLayout {
    /// Width in printer dots.
    pub fn width_dots(&self) -> u32 {
        (self.width_in * f64::from(self.dpi)).round() as u32
    }

    /// Height in printer dots.
    pub fn height_dots(&self) -> u32 {
        (self.height_in * f64::from(self.dpi)).round() as u32
    }

    /// Convert inches to printer dots.
    pub fn dots(&self, inches: f64) -> u32 {
        (inches * f64::from(self.dpi)).round() as u32
    }
}

/// One `caption: value` line of label text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelLine {
    /// Caption shown before the value.
    pub caption: &'static str,
    /// Field value, verbatim.
    pub value: String,
}

const LINE_ORDER: [(Field, &str); 8] = [
    (Field::SoNumber, "SO Number"),
    (Field::JobNumber, "Job Number"),
    (Field::Rbo, "RBO"),
    (Field::Item, "Item"),
    (Field::OrderQty, "Qty"),
    (Field::PoNumber, "PO Number"),
    (Field::Customer, "Customer"),
    (Field::Weight, "Weight"),
];

/// Text lines in print order. A total weight line follows the weight when
/// enabled and both weight and quantity are numeric.
pub fn label_lines(fields: &LabelFields) -> Vec<LabelLine> {
    let mut lines: Vec<LabelLine> = LINE_ORDER
        .iter()
        .map(|&(field, caption)| LabelLine {
            caption,
            value: fields.get(field).to_string(),
        })
        .collect();
    if fields.show_total_weight
        && let Some(total) = fields.total_weight()
    {
        lines.push(LabelLine {
            caption: "Total Weight",
            value: total.to_string(),
        });
    }
    lines
}

/// Plain-text print preview.
pub fn preview_text(fields: &LabelFields) -> String {
    let lines = label_lines(fields);
    let width = lines.iter().map(|l| l.caption.len()).max().unwrap_or(0);
    let mut out = String::new();
    for line in &lines {
        out.push_str(&format!("{:<width$}  {}\n", format!("{}:", line.caption), line.value, width = width + 1));
    }
    match fields.barcode_data() {
        Some(data) => out.push_str(&format!("Barcode: *{data}*\n")),
        None => out.push_str("Barcode: (none)\n"),
    }
    out
}
