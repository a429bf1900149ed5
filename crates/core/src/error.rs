//! Error taxonomy for loading, lookup, output, and configuration.

use std::io;
use std::path::PathBuf;

use carton_label_devices::DeviceError;

/// The order spreadsheet could not be loaded.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be opened or is not a readable spreadsheet.
    #[error("cannot open spreadsheet {}: {source}", .path.display())]
    Open {
        /// The file that was attempted.
        path: PathBuf,
        /// The underlying spreadsheet reader error.
        #[source]
        source: calamine::Error,
    },

    /// The workbook contains no worksheets.
    #[error("spreadsheet {} has no worksheets", .path.display())]
    NoSheet {
        /// The file that was loaded.
        path: PathBuf,
    },

    /// The first worksheet could not be parsed.
    #[error("cannot read first worksheet of {}: {source}", .path.display())]
    Sheet {
        /// The file that was loaded.
        path: PathBuf,
        /// The underlying spreadsheet reader error.
        #[source]
        source: calamine::Error,
    },
}

/// An SO number lookup did not produce label data.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No order data has been loaded, or the SO number is empty.
    #[error("load the order spreadsheet and enter an SO number first")]
    NoDataset,

    /// No row carries the requested SO number.
    #[error("SO Number '{0}' not found in the order data")]
    NotFound(String),

    /// The matched row lacks one of the label columns.
    #[error("order data has no '{column}' column (SO Number '{order_id}')")]
    MissingColumn {
        /// Header name of the missing column.
        column: &'static str,
        /// The SO number being looked up.
        order_id: String,
    },
}

impl LookupError {
    /// Returns `true` for conditions reported as information rather than
    /// as errors (nothing loaded yet, or no matching row).
    pub fn is_informational(&self) -> bool {
        matches!(self, LookupError::NoDataset | LookupError::NotFound(_))
    }
}

/// Rendering or delivering a label failed.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    /// The label could not be rendered.
    #[error("label rendering failed: {0}")]
    Render(String),

    /// PDF output is enabled but no folder was chosen.
    #[error("print to PDF is enabled but no PDF folder is selected")]
    NoPdfFolder,

    /// Writing the PDF file failed.
    #[error("cannot write {}: {source}", .path.display())]
    WriteFile {
        /// The file that was attempted.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Sending the label to the printer failed.
    #[error("printer delivery failed: {0}")]
    Printer(#[from] DeviceError),

    /// The automatic scale reading taken before printing failed.
    #[error("automatic weight reading failed: {0}")]
    Scale(#[source] DeviceError),
}

/// The configuration file could not be read or written.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The platform has no per-user configuration directory.
    #[error("no configuration directory available on this platform")]
    NoConfigDir,

    /// The configuration file exists but could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for this application.
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        /// The config file path.
        path: PathBuf,
        /// The TOML decoding error.
        #[source]
        source: toml::de::Error,
    },

    /// The configuration could not be encoded.
    #[error("cannot encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    /// The configuration file could not be written.
    #[error("cannot write config {}: {source}", .path.display())]
    Write {
        /// The config file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}
