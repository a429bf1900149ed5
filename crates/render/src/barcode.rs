//! Code 128 barcode modules for drawn (PDF) output.

use barcoders::sym::code128::Code128;
use carton_label_core::{LabelFields, OutputError};

/// Character-set B selector understood by `barcoders`.
const CHARSET_B: char = 'Ɓ';

/// Bar/space modules (`1` = bar) for `data` in Code 128 set B, including
/// start, checksum, and stop symbols.
pub fn code128_modules(data: &str) -> Result<Vec<u8>, OutputError> {
    if data.is_empty() {
        return Err(OutputError::Render("barcode data is empty".into()));
    }
    let barcode = Code128::new(format!("{CHARSET_B}{data}"))
        .map_err(|e| OutputError::Render(format!("cannot encode '{data}' as Code 128: {e}")))?;
    Ok(barcode.encode())
}

/// The text the label's barcode encodes.
///
/// Both ZPL and PDF output go through here, so a label is either
/// printable everywhere or nowhere: the text must be printable ASCII,
/// which is what Code 128 set B carries.
pub fn barcode_text(fields: &LabelFields) -> Result<&str, OutputError> {
    let text = fields.barcode_data().ok_or_else(|| {
        OutputError::Render("label has neither SO Number nor Job Number for the barcode".into())
    })?;
    if let Some(bad) = text.chars().find(|c| !matches!(c, ' '..='~')) {
        return Err(OutputError::Render(format!(
            "barcode text '{text}' contains '{bad}', which Code 128 cannot encode"
        )));
    }
    Ok(text)
}

/// Runs of consecutive bars as `(start_module, width_in_modules)`.
pub fn bar_runs(modules: &[u8]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &m) in modules.iter().enumerate() {
        match (m == 1, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, modules.len() - s));
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_ascii_with_quiet_structure() {
        let modules = code128_modules("SO100").unwrap();
        // 11-module symbols (start, data, checksum) plus a 13-module stop
        assert!(modules.len() >= 11 * 7 + 13);
        assert_eq!((modules.len() - 13) % 11, 0);
        assert_eq!(modules.first(), Some(&1));
        assert_eq!(modules.last(), Some(&1));
    }

    #[test]
    fn rejects_empty_and_non_ascii() {
        assert!(matches!(code128_modules(""), Err(OutputError::Render(_))));
        assert!(matches!(code128_modules("SÖ1"), Err(OutputError::Render(_))));
    }

    #[test]
    fn runs_of_bars() {
        assert_eq!(bar_runs(&[1, 1, 0, 1, 0, 0, 1, 1, 1]), [(0, 2), (3, 1), (6, 3)]);
        assert!(bar_runs(&[0, 0]).is_empty());
    }

    #[test]
    fn barcode_needs_an_identifier() {
        let fields = LabelFields::default();
        assert!(matches!(barcode_text(&fields), Err(OutputError::Render(_))));
    }

    #[test]
    fn barcode_text_must_be_printable_ascii() {
        let mut fields = LabelFields::default();
        fields.so_number = "SÖ1".into();
        match barcode_text(&fields) {
            Err(OutputError::Render(msg)) => assert!(msg.contains("'Ö'"), "got: {msg}"),
            other => panic!("expected Render error, got {other:?}"),
        }
        fields.so_number = "SO-1 A/B".into();
        assert_eq!(barcode_text(&fields).unwrap(), "SO-1 A/B");
    }
}
