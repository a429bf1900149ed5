//! The session controller: owns the dataset and the label fields, applies
//! lookups, and publishes [`SessionEvent`]s to observers over channels.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use carton_label_devices::{DeviceError, PortEnumerator, ScaleReader};
use tracing::{debug, info, warn};

use crate::dataset::Dataset;
use crate::error::{LoadError, LookupError, OutputError};
use crate::events::SessionEvent;
use crate::fields::{Field, Flag, LabelFields, format_number};
use crate::lookup::lookup;
use crate::output::{Delivery, Destination, LabelSink, pdf_file_name};

/// Factory default printer address.
pub const DEFAULT_PRINTER_ADDRESS: &str = "10.1.10.110";

/// Operator settings that are not printed on the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Network printer address used when not printing to PDF.
    pub printer_address: String,
    /// Selected scale port, if any.
    pub scale_port: Option<String>,
    /// Folder receiving PDF labels.
    pub pdf_folder: Option<PathBuf>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            printer_address: DEFAULT_PRINTER_ADDRESS.to_string(),
            scale_port: None,
            pdf_folder: None,
        }
    }
}

/// A single operator session.
///
/// Every operation runs to completion on the caller's thread. Failures are
/// returned to the caller and also published as a notice, leaving the
/// dataset and fields in their last valid state.
#[derive(Debug, Default)]
pub struct Session {
    dataset: Option<Arc<Dataset>>,
    fields: LabelFields,
    settings: SessionSettings,
    observers: Vec<Sender<SessionEvent>>,
}

impl Session {
    /// Start a session with the given settings and no dataset.
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Register an observer. Dropped receivers are pruned on the next event.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.observers.push(tx);
        rx
    }

    fn publish(&mut self, event: SessionEvent) {
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Current label fields.
    pub fn fields(&self) -> &LabelFields {
        &self.fields
    }

    /// Current operator settings.
    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The loaded dataset, if any.
    pub fn dataset(&self) -> Option<Arc<Dataset>> {
        self.dataset.clone()
    }

    // ── Dataset ────────────────────────────────────────────────────────

    /// Load a spreadsheet, replacing any previous dataset in full.
    pub fn load_dataset(&mut self, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        match Dataset::load(path.as_ref()) {
            Ok(dataset) => Ok(self.replace_dataset(dataset)),
            Err(err) => {
                warn!(%err, "order data not loaded");
                self.publish(SessionEvent::error(format!(
                    "An error occurred while loading the order data: {err}"
                )));
                Err(err)
            }
        }
    }

    /// Install an already built dataset, replacing any previous one.
    pub fn replace_dataset(&mut self, dataset: Dataset) -> usize {
        let rows = dataset.len();
        let path = dataset.source().map(Path::to_path_buf).unwrap_or_default();
        self.dataset = Some(Arc::new(dataset));
        info!(rows, "order data replaced");
        self.publish(SessionEvent::DatasetLoaded { path, rows });
        self.publish(SessionEvent::info(format!(
            "Order data loaded successfully ({rows} rows)."
        )));
        rows
    }

    // ── Fields ─────────────────────────────────────────────────────────

    /// Set the SO number and populate the dependent fields from the first
    /// matching row.
    ///
    /// The SO number itself always takes the new value. The other fields
    /// change only when the whole row projects cleanly.
    pub fn set_so_number(&mut self, value: &str) -> Result<(), LookupError> {
        self.fields.so_number = value.to_string();
        self.publish(SessionEvent::FieldChanged {
            field: Field::SoNumber,
            value: value.to_string(),
        });

        match lookup(self.dataset.as_deref(), value) {
            Ok(data) => {
                self.fields.apply(data);
                debug!(so_number = value, "fields populated");
                self.publish(SessionEvent::FieldsPopulated {
                    so_number: value.trim().to_string(),
                });
                Ok(())
            }
            Err(err) => {
                let event = if err.is_informational() {
                    SessionEvent::info(err.to_string())
                } else {
                    SessionEvent::error(err.to_string())
                };
                self.publish(event);
                Err(err)
            }
        }
    }

    /// Set any text field. Setting the SO number triggers a lookup; other
    /// fields change independently.
    pub fn set_field(&mut self, field: Field, value: &str) -> Result<(), LookupError> {
        if field == Field::SoNumber {
            return self.set_so_number(value);
        }
        self.fields.set(field, value);
        self.publish(SessionEvent::FieldChanged {
            field,
            value: value.to_string(),
        });
        Ok(())
    }

    /// Toggle an output-mode flag.
    pub fn set_flag(&mut self, flag: Flag, enabled: bool) {
        self.fields.set_flag(flag, enabled);
        self.publish(SessionEvent::FlagChanged { flag, enabled });
    }

    // ── Settings ───────────────────────────────────────────────────────

    /// Change the network printer address.
    pub fn set_printer_address(&mut self, address: &str) {
        self.settings.printer_address = address.trim().to_string();
    }

    /// Choose (or clear) the PDF output folder.
    pub fn set_pdf_folder(&mut self, folder: Option<PathBuf>) {
        self.settings.pdf_folder = folder;
    }

    /// Select the scale port. Only ports reported by `ports` are accepted.
    pub fn select_port(
        &mut self,
        port: &str,
        ports: &(impl PortEnumerator + ?Sized),
    ) -> Result<(), DeviceError> {
        let port = port.trim();
        if !ports.list_ports().iter().any(|p| p == port) {
            let err = DeviceError::UnknownPort(port.to_string());
            self.publish(SessionEvent::error(err.to_string()));
            return Err(err);
        }
        self.settings.scale_port = Some(port.to_string());
        self.publish(SessionEvent::PortSelected {
            port: port.to_string(),
        });
        Ok(())
    }

    // ── Scale ──────────────────────────────────────────────────────────

    /// Read the scale on the selected port and store the weight.
    pub fn read_weight(
        &mut self,
        scale: &mut (impl ScaleReader + ?Sized),
    ) -> Result<f64, DeviceError> {
        self.take_weight(scale).inspect_err(|err| {
            warn!(%err, "scale reading failed");
            self.publish(SessionEvent::error(format!("Scale reading failed: {err}")));
        })
    }

    fn take_weight(
        &mut self,
        scale: &mut (impl ScaleReader + ?Sized),
    ) -> Result<f64, DeviceError> {
        let port = self
            .settings
            .scale_port
            .clone()
            .ok_or(DeviceError::NoPortSelected)?;
        let weight = scale.read_weight(&port)?;
        let text = format_number(weight);
        self.fields.weight = text.clone();
        info!(port = %port, weight = %text, "weight read");
        self.publish(SessionEvent::WeightRead { weight: text });
        Ok(weight)
    }

    // ── Output ─────────────────────────────────────────────────────────

    /// Where a print issued now would go.
    pub fn destination(&self) -> Result<Destination, OutputError> {
        if self.fields.print_to_pdf {
            let folder = self
                .settings
                .pdf_folder
                .as_ref()
                .ok_or(OutputError::NoPdfFolder)?;
            Ok(Destination::PdfFile(
                folder.join(pdf_file_name(&self.fields.so_number)),
            ))
        } else {
            Ok(Destination::Printer(self.settings.printer_address.clone()))
        }
    }

    /// Render and deliver the current label, reading the scale first when
    /// auto weight is enabled.
    pub fn print(
        &mut self,
        sink: &mut (impl LabelSink + ?Sized),
        scale: &mut (impl ScaleReader + ?Sized),
    ) -> Result<Delivery, OutputError> {
        match self.try_print(sink, scale) {
            Ok(delivery) => {
                info!(destination = %delivery.destination, bytes = delivery.bytes, "label delivered");
                self.publish(SessionEvent::info(format!(
                    "Label sent to {}.",
                    delivery.destination
                )));
                self.publish(SessionEvent::LabelDelivered {
                    delivery: delivery.clone(),
                });
                Ok(delivery)
            }
            Err(err) => {
                warn!(%err, "label not delivered");
                self.publish(SessionEvent::error(err.to_string()));
                Err(err)
            }
        }
    }

    fn try_print(
        &mut self,
        sink: &mut (impl LabelSink + ?Sized),
        scale: &mut (impl ScaleReader + ?Sized),
    ) -> Result<Delivery, OutputError> {
        let destination = self.destination()?;
        if self.fields.auto_weight_enabled {
            self.take_weight(scale).map_err(OutputError::Scale)?;
        }
        sink.deliver(&self.fields, &destination)
    }
}
