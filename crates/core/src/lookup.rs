//! SO number lookup against the loaded dataset.

use tracing::debug;

use crate::dataset::{Dataset, OrderRecord, columns};
use crate::error::LookupError;
use crate::fields::LabelData;

/// Result of searching the dataset for an SO number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome<'a> {
    /// The first row in file order with this SO number.
    Found(&'a OrderRecord),
    /// A dataset is loaded but no row carries this SO number.
    NotFound,
    /// Nothing is loaded, or the SO number is empty.
    NoDataset,
}

/// Find the first record whose SO number equals `order_id`.
///
/// Surrounding whitespace is ignored; the comparison is case-sensitive.
pub fn find<'a>(dataset: Option<&'a Dataset>, order_id: &str) -> LookupOutcome<'a> {
    let order_id = order_id.trim();
    let Some(dataset) = dataset else {
        return LookupOutcome::NoDataset;
    };
    if order_id.is_empty() {
        return LookupOutcome::NoDataset;
    }
    match dataset.first_match(order_id) {
        Some(record) => LookupOutcome::Found(record),
        None => LookupOutcome::NotFound,
    }
}

/// Find `order_id` and project the row into label data.
///
/// A dataset without an `SO Number` column reports `MissingColumn` rather
/// than `NotFound`, since no identifier could ever match.
pub fn lookup(dataset: Option<&Dataset>, order_id: &str) -> Result<LabelData, LookupError> {
    let outcome = find(dataset, order_id);
    debug!(order_id, ?outcome, "lookup");
    match outcome {
        LookupOutcome::Found(record) => record.label_data(),
        LookupOutcome::NoDataset => Err(LookupError::NoDataset),
        LookupOutcome::NotFound => match dataset {
            Some(ds) if !ds.has_column(columns::SO_NUMBER) => Err(LookupError::MissingColumn {
                column: columns::SO_NUMBER,
                order_id: order_id.trim().to_string(),
            }),
            _ => Err(LookupError::NotFound(order_id.trim().to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::from_table(vec![
            vec![
                "SO Number",
                "Job Number",
                "RBO",
                "Weight",
                "Item",
                "Order Qty",
                "PO Number",
                "Customer",
            ],
            vec!["SO100", "J1", "R1", "12.5", "Widget", "4", "PO9", "Acme"],
        ])
    }

    #[test]
    fn found_projects_all_fields() {
        let ds = sample();
        let data = lookup(Some(&ds), "SO100").unwrap();
        assert_eq!(data.job_number, "J1");
        assert_eq!(data.rbo, "R1");
        assert_eq!(data.weight, "12.5");
        assert_eq!(data.item, "Widget");
        assert_eq!(data.order_qty, "4");
        assert_eq!(data.po_number, "PO9");
        assert_eq!(data.customer, "Acme");
    }

    #[test]
    fn miss_reports_identifier() {
        let ds = sample();
        assert_eq!(find(Some(&ds), "SO999"), LookupOutcome::NotFound);
        assert_eq!(
            lookup(Some(&ds), " SO999 "),
            Err(LookupError::NotFound("SO999".into()))
        );
    }

    #[test]
    fn no_dataset_or_empty_id() {
        assert_eq!(find(None, "SO100"), LookupOutcome::NoDataset);
        let ds = sample();
        assert_eq!(find(Some(&ds), "   "), LookupOutcome::NoDataset);
        assert_eq!(lookup(None, "SO100"), Err(LookupError::NoDataset));
    }

    #[test]
    fn missing_key_column() {
        let ds = Dataset::from_table(vec![vec!["Order", "RBO"], vec!["SO100", "R1"]]);
        assert_eq!(
            lookup(Some(&ds), "SO100"),
            Err(LookupError::MissingColumn {
                column: "SO Number",
                order_id: "SO100".into()
            })
        );
    }
}
