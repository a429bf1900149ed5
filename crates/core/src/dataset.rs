//! Order dataset loaded from the first sheet of a spreadsheet.
//!
//! The first non-blank row is the header. Columns are matched by their
//! trimmed header text; columns the label does not use are ignored. Column
//! presence is not checked here: a record simply carries `None` for any
//! label column the sheet lacks, and lookup reports it.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{Data, DataType, Reader, open_workbook_auto};
use chrono::NaiveTime;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{LoadError, LookupError};
use crate::fields::{DEFAULT_ORDER_QTY, Field, LabelData, format_number};

/// Header names of the columns the label reads.
pub mod columns {
    /// Lookup key column.
    pub const SO_NUMBER: &str = "SO Number";
    /// Job number column.
    pub const JOB_NUMBER: &str = "Job Number";
    /// RBO column.
    pub const RBO: &str = "RBO";
    /// Weight column.
    pub const WEIGHT: &str = "Weight";
    /// Item column.
    pub const ITEM: &str = "Item";
    /// Order quantity column.
    pub const ORDER_QTY: &str = "Order Qty";
    /// PO number column.
    pub const PO_NUMBER: &str = "PO Number";
    /// Customer column.
    pub const CUSTOMER: &str = "Customer";
}

/// One order row. `None` means the sheet has no such column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct OrderRecord {
    /// SO number (lookup key).
    pub order_id: Option<String>,
    /// Job number.
    pub job_number: Option<String>,
    /// RBO code.
    pub rbo: Option<String>,
    /// Weight.
    pub weight: Option<String>,
    /// Item.
    pub item: Option<String>,
    /// Order quantity.
    pub order_qty: Option<String>,
    /// PO number.
    pub po_number: Option<String>,
    /// Customer.
    pub customer: Option<String>,
}

impl OrderRecord {
    /// Project this row into the seven dependent label fields.
    ///
    /// Fails on the first missing column so that a partial row is never
    /// applied. An empty quantity cell becomes `1`.
    pub fn label_data(&self) -> Result<LabelData, LookupError> {
        let order_id = self.order_id.clone().unwrap_or_default();
        let take = |value: &Option<String>, column: &'static str| {
            value.clone().ok_or_else(|| LookupError::MissingColumn {
                column,
                order_id: order_id.clone(),
            })
        };

        Ok(LabelData {
            job_number: take(&self.job_number, columns::JOB_NUMBER)?,
            rbo: take(&self.rbo, columns::RBO)?,
            weight: take(&self.weight, columns::WEIGHT)?,
            item: take(&self.item, columns::ITEM)?,
            order_qty: take(&self.order_qty, columns::ORDER_QTY).map(|qty| {
                if qty.is_empty() {
                    DEFAULT_ORDER_QTY.to_string()
                } else {
                    qty
                }
            })?,
            po_number: take(&self.po_number, columns::PO_NUMBER)?,
            customer: take(&self.customer, columns::CUSTOMER)?,
        })
    }
}

/// Column positions of the label columns within a header row.
#[derive(Debug, Clone, Default)]
struct ColumnMap {
    positions: HashMap<Field, usize>,
}

impl ColumnMap {
    fn from_header(header: &[String]) -> Self {
        let mut positions = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            let name = name.trim();
            if let Some(field) = Field::ALL.iter().find(|f| f.caption() == name) {
                positions.entry(*field).or_insert(idx);
            }
        }
        Self { positions }
    }

    fn cell(&self, row: &[String], field: Field) -> Option<String> {
        self.positions
            .get(&field)
            .map(|&idx| row.get(idx).cloned().unwrap_or_default())
    }

    fn record(&self, row: &[String]) -> OrderRecord {
        OrderRecord {
            order_id: self.cell(row, Field::SoNumber),
            job_number: self.cell(row, Field::JobNumber),
            rbo: self.cell(row, Field::Rbo),
            weight: self.cell(row, Field::Weight),
            item: self.cell(row, Field::Item),
            order_qty: self.cell(row, Field::OrderQty),
            po_number: self.cell(row, Field::PoNumber),
            customer: self.cell(row, Field::Customer),
        }
    }
}

/// An immutable, ordered set of order rows with an SO number index.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    source: Option<PathBuf>,
    headers: Vec<String>,
    records: Vec<OrderRecord>,
    index: HashMap<String, usize>,
}

impl Dataset {
    /// Load the first sheet of the spreadsheet at `path`.
    ///
    /// Any format `calamine` understands is accepted (`.xlsx`, `.xlsm`,
    /// `.xls`, `.ods`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let mut workbook = open_workbook_auto(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| LoadError::NoSheet {
                path: path.to_path_buf(),
            })?
            .map_err(|source| LoadError::Sheet {
                path: path.to_path_buf(),
                source,
            })?;

        let table: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect())
            .collect();

        let mut dataset = Self::from_table(table);
        dataset.source = Some(path.to_path_buf());
        info!(
            path = %path.display(),
            rows = dataset.len(),
            "loaded order data"
        );
        Ok(dataset)
    }

    /// Build a dataset from rows of display text. The first non-blank row is
    /// the header; blank rows are skipped.
    pub fn from_table<R, S>(table: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut rows = table
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect::<Vec<String>>())
            .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()));

        let Some(headers) = rows.next() else {
            return Self::default();
        };
        let map = ColumnMap::from_header(&headers);

        let mut records = Vec::new();
        let mut index = HashMap::new();
        for row in rows {
            let record = map.record(&row);
            if let Some(id) = record.order_id.as_deref().map(str::trim)
                && !id.is_empty()
            {
                index.entry(id.to_string()).or_insert(records.len());
            }
            records.push(record);
        }

        debug!(columns = headers.len(), rows = records.len(), "indexed order table");
        Self {
            source: None,
            headers: headers.iter().map(|h| h.trim().to_string()).collect(),
            records,
            index,
        }
    }

    /// The file this dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Header names in sheet order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Whether the header row contains `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Rows in file order.
    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First row (in file order) whose SO number equals `order_id`.
    pub fn first_match(&self, order_id: &str) -> Option<&OrderRecord> {
        self.index
            .get(order_id.trim())
            .and_then(|&idx| self.records.get(idx))
    }
}

/// Display text of a spreadsheet cell. Date cells become ISO dates rather
/// than their serial numbers.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => format_number(*f),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) if dt.time() == NaiveTime::MIN => dt.format("%Y-%m-%d").to_string(),
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => cell.to_string(),
        },
        Data::DateTimeIso(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}
