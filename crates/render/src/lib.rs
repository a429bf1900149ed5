//! Carton label rendering.
//!
//! Labels are rendered as ZPL for network printers or as a single-page PDF.
//! Both carry the same text lines and a Code 128 barcode of the SO number.
//! [`LabelOutput`] picks the format from the [`Destination`](carton_label_core::Destination)
//! and delivers it.

mod barcode;
mod layout;
mod pdf;
mod sink;
mod zpl;

pub use barcode::{bar_runs, barcode_text, code128_modules};
pub use layout::{LabelLayout, LabelLine, label_lines, preview_text};
pub use pdf::render_pdf;
pub use sink::LabelOutput;
pub use zpl::{escape_field_data, render_zpl};
