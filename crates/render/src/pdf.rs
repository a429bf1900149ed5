//! Single-page PDF rendering of a label.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use carton_label_core::{LabelFields, OutputError};

use crate::barcode::{bar_runs, barcode_text, code128_modules};
use crate::layout::{LabelLayout, label_lines};

const POINTS_PER_INCH: f32 = 72.0;
const MAX_MODULE_WIDTH: f32 = 2.0;

fn render_err(e: impl std::fmt::Display) -> OutputError {
    OutputError::Render(e.to_string())
}

/// Helvetica uses WinAnsi; characters outside Latin-1 become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn text_ops(ops: &mut Vec<Operation>, x: f32, y: f32, size: f32, text: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec!["F1".into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::string_literal(win_ansi(text))],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Render the label as PDF bytes: one page sized to the label, text lines
/// in Helvetica, and the Code 128 barcode drawn as filled bars.
pub fn render_pdf(fields: &LabelFields, layout: &LabelLayout) -> Result<Vec<u8>, OutputError> {
    let modules = code128_modules(barcode_text(fields)?)?;

    let width = layout.width_in as f32 * POINTS_PER_INCH;
    let height = layout.height_in as f32 * POINTS_PER_INCH;
    let margin = 0.2 * POINTS_PER_INCH;
    let font = 0.16 * POINTS_PER_INCH;
    let step = font * 1.5;

    let mut ops = Vec::new();
    let mut y = height - margin - font;
    for line in label_lines(fields) {
        text_ops(&mut ops, margin, y, font, &format!("{}: {}", line.caption, line.value));
        y -= step;
    }

    let bar_height = 0.6 * POINTS_PER_INCH;
    let module = ((width - 2.0 * margin) / modules.len() as f32).min(MAX_MODULE_WIDTH);
    let bar_top = y - step / 2.0;
    let bar_bottom = bar_top - bar_height;
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("rg", vec![0.into(), 0.into(), 0.into()]));
    for (start, run) in bar_runs(&modules) {
        ops.push(Operation::new(
            "re",
            vec![
                (margin + start as f32 * module).into(),
                bar_bottom.into(),
                (run as f32 * module).into(),
                bar_height.into(),
            ],
        ));
    }
    ops.push(Operation::new("f", vec![]));
    ops.push(Operation::new("Q", vec![]));
    if let Ok(text) = barcode_text(fields) {
        text_ops(&mut ops, margin, bar_bottom - font - 2.0, font, text);
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content { operations: ops };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().map_err(render_err)?,
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(render_err)?;
    Ok(bytes)
}
