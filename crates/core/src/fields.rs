//! The label field state: everything that ends up on the printed label.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;

/// Default order quantity shown before any lookup.
pub const DEFAULT_ORDER_QTY: &str = "1";

/// A text field on the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    /// The sales order number; the lookup key.
    SoNumber,
    /// Production job number.
    JobNumber,
    /// RBO code, carried verbatim.
    Rbo,
    /// Carton weight in scale units.
    Weight,
    /// Item description or code.
    Item,
    /// Ordered quantity.
    OrderQty,
    /// Customer purchase order number.
    PoNumber,
    /// Customer name.
    Customer,
}

impl Field {
    /// All fields in label order.
    pub const ALL: [Field; 8] = [
        Field::SoNumber,
        Field::JobNumber,
        Field::Rbo,
        Field::Weight,
        Field::Item,
        Field::OrderQty,
        Field::PoNumber,
        Field::Customer,
    ];

    /// Caption used on the label and in the spreadsheet header.
    pub fn caption(self) -> &'static str {
        match self {
            Field::SoNumber => "SO Number",
            Field::JobNumber => "Job Number",
            Field::Rbo => "RBO",
            Field::Weight => "Weight",
            Field::Item => "Item",
            Field::OrderQty => "Order Qty",
            Field::PoNumber => "PO Number",
            Field::Customer => "Customer",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.caption())
    }
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "so" | "so_number" => Ok(Field::SoNumber),
            "job" | "job_number" => Ok(Field::JobNumber),
            "rbo" => Ok(Field::Rbo),
            "weight" => Ok(Field::Weight),
            "item" => Ok(Field::Item),
            "qty" | "order_qty" => Ok(Field::OrderQty),
            "po" | "po_number" => Ok(Field::PoNumber),
            "customer" => Ok(Field::Customer),
            _ => Err(format!("unknown field '{}'", s.trim())),
        }
    }
}

/// An output-mode flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// Write a PDF file instead of sending to the network printer.
    PrintToPdf,
    /// Read the scale automatically before each print.
    AutoWeight,
    /// Add a total weight line (weight × quantity) to the label.
    ShowTotalWeight,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Flag::PrintToPdf => "Print to PDF",
            Flag::AutoWeight => "Auto Weight",
            Flag::ShowTotalWeight => "Show Total Weight",
        })
    }
}

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "pdf" | "print_to_pdf" => Ok(Flag::PrintToPdf),
            "auto_weight" | "auto" => Ok(Flag::AutoWeight),
            "total" | "total_weight" | "show_total_weight" => Ok(Flag::ShowTotalWeight),
            _ => Err(format!("unknown flag '{}'", s.trim())),
        }
    }
}

/// The seven fields a matched order row supplies, already in display form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LabelData {
    /// Production job number.
    pub job_number: String,
    /// RBO code.
    pub rbo: String,
    /// Carton weight.
    pub weight: String,
    /// Item description or code.
    pub item: String,
    /// Ordered quantity.
    pub order_qty: String,
    /// Customer purchase order number.
    pub po_number: String,
    /// Customer name.
    pub customer: String,
}

/// Current values of every label field plus the output-mode flags.
///
/// Text fields accept any string; nothing here validates numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelFields {
    /// Sales order number being edited.
    pub so_number: String,
    /// Production job number.
    pub job_number: String,
    /// RBO code.
    pub rbo: String,
    /// Carton weight.
    pub weight: String,
    /// Item description or code.
    pub item: String,
    /// Ordered quantity.
    pub order_qty: String,
    /// Customer purchase order number.
    pub po_number: String,
    /// Customer name.
    pub customer: String,
    /// Deliver to a PDF file instead of the network printer.
    pub print_to_pdf: bool,
    /// Read the scale before each print.
    pub auto_weight_enabled: bool,
    /// Show weight × quantity on the label.
    pub show_total_weight: bool,
}

impl Default for LabelFields {
    fn default() -> Self {
        Self {
            so_number: String::new(),
            job_number: String::new(),
            rbo: String::new(),
            weight: String::new(),
            item: String::new(),
            order_qty: DEFAULT_ORDER_QTY.to_string(),
            po_number: String::new(),
            customer: String::new(),
            print_to_pdf: false,
            auto_weight_enabled: false,
            show_total_weight: false,
        }
    }
}

impl LabelFields {
    /// Current value of a text field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::SoNumber => &self.so_number,
            Field::JobNumber => &self.job_number,
            Field::Rbo => &self.rbo,
            Field::Weight => &self.weight,
            Field::Item => &self.item,
            Field::OrderQty => &self.order_qty,
            Field::PoNumber => &self.po_number,
            Field::Customer => &self.customer,
        }
    }

    /// Overwrite one text field. No other field changes.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::SoNumber => &mut self.so_number,
            Field::JobNumber => &mut self.job_number,
            Field::Rbo => &mut self.rbo,
            Field::Weight => &mut self.weight,
            Field::Item => &mut self.item,
            Field::OrderQty => &mut self.order_qty,
            Field::PoNumber => &mut self.po_number,
            Field::Customer => &mut self.customer,
        };
        *slot = value.into();
    }

    /// Current value of a flag.
    pub fn flag(&self, flag: Flag) -> bool {
        match flag {
            Flag::PrintToPdf => self.print_to_pdf,
            Flag::AutoWeight => self.auto_weight_enabled,
            Flag::ShowTotalWeight => self.show_total_weight,
        }
    }

    /// Set one flag. Flags are independent of each other.
    pub fn set_flag(&mut self, flag: Flag, enabled: bool) {
        match flag {
            Flag::PrintToPdf => self.print_to_pdf = enabled,
            Flag::AutoWeight => self.auto_weight_enabled = enabled,
            Flag::ShowTotalWeight => self.show_total_weight = enabled,
        }
    }

    /// Overwrite all seven dependent fields at once.
    pub fn apply(&mut self, data: LabelData) {
        self.job_number = data.job_number;
        self.rbo = data.rbo;
        self.weight = data.weight;
        self.item = data.item;
        self.order_qty = data.order_qty;
        self.po_number = data.po_number;
        self.customer = data.customer;
    }

    /// Weight × order quantity in decimal arithmetic, when both parse as
    /// numbers. Trailing zeros are dropped (`12.5 × 4` is `50`).
    pub fn total_weight(&self) -> Option<Decimal> {
        let weight: Decimal = self.weight.trim().parse().ok()?;
        let qty: Decimal = self.order_qty.trim().parse().ok()?;
        weight.checked_mul(qty).map(|total| total.normalize())
    }

    /// Text encoded in the barcode: the SO number, or the job number when
    /// the SO number is blank.
    pub fn barcode_data(&self) -> Option<&str> {
        [self.so_number.trim(), self.job_number.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
    }
}

/// Display form of a number: shortest round-trip text, no trailing `.0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let fields = LabelFields::default();
        assert_eq!(fields.order_qty, "1");
        assert!(fields.so_number.is_empty());
        assert!(!fields.print_to_pdf && !fields.auto_weight_enabled && !fields.show_total_weight);
    }

    #[test]
    fn set_touches_only_one_field() {
        let mut fields = LabelFields::default();
        fields.set(Field::Rbo, "R7");
        let mut expected = LabelFields::default();
        expected.rbo = "R7".into();
        assert_eq!(fields, expected);
        assert_eq!(fields.get(Field::Rbo), "R7");
    }

    #[test]
    fn flags_are_independent() {
        let mut fields = LabelFields::default();
        fields.set_flag(Flag::PrintToPdf, true);
        assert!(fields.flag(Flag::PrintToPdf));
        assert!(!fields.flag(Flag::AutoWeight));
        assert!(!fields.flag(Flag::ShowTotalWeight));
        fields.set_flag(Flag::AutoWeight, true);
        fields.set_flag(Flag::PrintToPdf, false);
        assert!(fields.flag(Flag::AutoWeight));
        assert!(!fields.flag(Flag::PrintToPdf));
    }

    #[test]
    fn field_names_parse() {
        assert_eq!("so".parse::<Field>().unwrap(), Field::SoNumber);
        assert_eq!("Job Number".parse::<Field>().unwrap(), Field::JobNumber);
        assert_eq!("order-qty".parse::<Field>().unwrap(), Field::OrderQty);
        assert_eq!("PO".parse::<Field>().unwrap(), Field::PoNumber);
        assert!("colour".parse::<Field>().is_err());
        assert_eq!("pdf".parse::<Flag>().unwrap(), Flag::PrintToPdf);
        assert_eq!("auto-weight".parse::<Flag>().unwrap(), Flag::AutoWeight);
        assert_eq!("total".parse::<Flag>().unwrap(), Flag::ShowTotalWeight);
    }

    #[test]
    fn total_weight_needs_numbers() {
        let mut fields = LabelFields::default();
        fields.weight = "12.5".into();
        fields.order_qty = "4".into();
        assert_eq!(fields.total_weight(), Some(Decimal::from(50)));
        fields.order_qty = "four".into();
        assert_eq!(fields.total_weight(), None);
        fields.order_qty = "4".into();
        fields.weight.clear();
        assert_eq!(fields.total_weight(), None);
    }

    #[test]
    fn total_weight_is_exact_decimal() {
        let mut fields = LabelFields::default();
        fields.weight = "1.1".into();
        fields.order_qty = "3".into();
        assert_eq!(fields.total_weight().map(|t| t.to_string()).as_deref(), Some("3.3"));
        fields.weight = "0.1".into();
        assert_eq!(fields.total_weight().map(|t| t.to_string()).as_deref(), Some("0.3"));
        fields.weight = "12.50".into();
        fields.order_qty = "4".into();
        assert_eq!(fields.total_weight().map(|t| t.to_string()).as_deref(), Some("50"));
    }

    #[test]
    fn barcode_falls_back_to_job_number() {
        let mut fields = LabelFields::default();
        assert_eq!(fields.barcode_data(), None);
        fields.job_number = "J1".into();
        assert_eq!(fields.barcode_data(), Some("J1"));
        fields.so_number = " SO100 ".into();
        assert_eq!(fields.barcode_data(), Some("SO100"));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(100234.0), "100234");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }
}
