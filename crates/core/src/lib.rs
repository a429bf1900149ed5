//! Order lookup and label session control for carton labels.
//!
//! A [`Session`] owns the loaded [`Dataset`] and the current
//! [`LabelFields`]. Entering an SO number looks up the first matching order
//! row and populates the label; printing hands the fields to a
//! [`LabelSink`], optionally reading a scale first. Observers follow the
//! session through [`SessionEvent`]s delivered over channels.
//!
//! ```
//! use carton_label_core::{Dataset, Session, SessionSettings};
//!
//! let dataset = Dataset::from_table(vec![
//!     vec!["SO Number", "Job Number", "RBO", "Weight", "Item", "Order Qty", "PO Number", "Customer"],
//!     vec!["SO100", "J1", "R1", "12.5", "Widget", "4", "PO9", "Acme"],
//! ]);
//! let mut session = Session::new(SessionSettings::default());
//! session.replace_dataset(dataset);
//! session.set_so_number("SO100").unwrap();
//! assert_eq!(session.fields().customer, "Acme");
//! ```

mod config;
mod dataset;
mod error;
mod events;
mod fields;
mod lookup;
mod output;
mod session;

pub use config::{AppConfig, LabelSection, OutputSection, PrinterSection, ScaleSection};
pub use dataset::{Dataset, OrderRecord, columns};
pub use error::{ConfigError, LoadError, LookupError, OutputError};
pub use events::{SessionEvent, Severity};
pub use fields::{DEFAULT_ORDER_QTY, Field, Flag, LabelData, LabelFields, format_number};
pub use lookup::{LookupOutcome, find, lookup};
pub use output::{Delivery, Destination, LabelSink, pdf_file_name};
pub use session::{DEFAULT_PRINTER_ADDRESS, Session, SessionSettings};
