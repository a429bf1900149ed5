//! The production [`LabelSink`]: ZPL over TCP or a PDF file on disk.

use carton_label_core::{Delivery, Destination, LabelFields, LabelSink, OutputError};
use carton_label_devices::{Printer, PrinterConfig, TcpPrinter};
use tracing::{debug, info};

use crate::layout::LabelLayout;
use crate::pdf::render_pdf;
use crate::zpl::render_zpl;

/// Renders labels for the requested destination and delivers them.
#[derive(Debug, Clone, Default)]
pub struct LabelOutput {
    layout: LabelLayout,
    printer: PrinterConfig,
}

impl LabelOutput {
    /// Create an output with the given geometry and printer settings.
    pub fn new(layout: LabelLayout, printer: PrinterConfig) -> Self {
        Self { layout, printer }
    }

    /// Label geometry in use.
    pub fn layout(&self) -> &LabelLayout {
        &self.layout
    }
}

impl LabelSink for LabelOutput {
    fn deliver(
        &mut self,
        fields: &LabelFields,
        destination: &Destination,
    ) -> Result<Delivery, OutputError> {
        let bytes = match destination {
            Destination::Printer(addr) => {
                let zpl = render_zpl(fields, &self.layout)?;
                let mut printer = TcpPrinter::connect(addr, &self.printer)?;
                debug!(peer = %printer.remote_addr(), "printer connected");
                printer.send_zpl(&zpl)?;
                zpl.len()
            }
            Destination::PdfFile(path) => {
                let pdf = render_pdf(fields, &self.layout)?;
                std::fs::write(path, &pdf).map_err(|source| OutputError::WriteFile {
                    path: path.clone(),
                    source,
                })?;
                pdf.len()
            }
        };
        info!(%destination, bytes, "label rendered and delivered");
        Ok(Delivery {
            destination: destination.clone(),
            bytes,
        })
    }
}
