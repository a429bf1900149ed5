//! Application configuration.
//!
//! Stored as TOML at `<config_dir>/carton-label/config.toml`. A missing file
//! yields defaults; every key is optional.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use carton_label_devices::{DEFAULT_BAUD, PrinterConfig, ScaleSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::session::{DEFAULT_PRINTER_ADDRESS, SessionSettings};

const APP_DIR: &str = "carton-label";
const FILE_NAME: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Network printer settings.
    pub printer: PrinterSection,
    /// Scale settings.
    pub scale: ScaleSection,
    /// Output settings.
    pub output: OutputSection,
    /// Label geometry.
    pub label: LabelSection,
}

/// `[printer]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterSection {
    /// `IP[:PORT]` or hostname; port 9100 when omitted.
    pub address: String,
    /// TCP connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// Write timeout in milliseconds.
    pub write_timeout_ms: u64,
}

impl Default for PrinterSection {
    fn default() -> Self {
        Self {
            address: DEFAULT_PRINTER_ADDRESS.to_string(),
            connect_timeout_ms: 5_000,
            write_timeout_ms: 30_000,
        }
    }
}

/// `[scale]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleSection {
    /// Port the scale is attached to, if already known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
    /// Serial baud rate.
    pub baud: u32,
    /// How long to wait for a reading, in milliseconds.
    pub read_timeout_ms: u64,
}

impl Default for ScaleSection {
    fn default() -> Self {
        Self {
            port: None,
            baud: DEFAULT_BAUD,
            read_timeout_ms: 3_000,
        }
    }
}

/// `[output]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Folder receiving PDF labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_folder: Option<PathBuf>,
}

/// `[label]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelSection {
    /// Label width in inches.
    pub width_in: f64,
    /// Label height in inches.
    pub height_in: f64,
    /// Printer resolution in dots per inch.
    pub dpi: u32,
}

impl Default for LabelSection {
    fn default() -> Self {
        Self {
            width_in: 4.0,
            height_in: 6.0,
            dpi: 203,
        }
    }
}

impl AppConfig {
    /// Default config file location.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join(APP_DIR).join(FILE_NAME))
    }

    /// Load from `path`, or from the default location when `None`.
    /// A file that does not exist yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Write this config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Printer transport settings.
    pub fn printer_config(&self) -> PrinterConfig {
        PrinterConfig::with_timeouts(
            Duration::from_millis(self.printer.connect_timeout_ms),
            Duration::from_millis(self.printer.write_timeout_ms),
        )
    }

    /// Scale serial settings.
    pub fn scale_settings(&self) -> ScaleSettings {
        ScaleSettings::new(
            self.scale.baud,
            Duration::from_millis(self.scale.read_timeout_ms),
        )
    }

    /// Initial session settings.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            printer_address: self.printer.address.clone(),
            scale_port: self.scale.port.clone(),
            pdf_folder: self.output.pdf_folder.clone(),
        }
    }
}

impl fmt::Display for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Printer address:  {}", self.printer.address)?;
        writeln!(f, "Connect timeout:  {} ms", self.printer.connect_timeout_ms)?;
        writeln!(f, "Write timeout:    {} ms", self.printer.write_timeout_ms)?;
        writeln!(
            f,
            "Scale port:       {}",
            self.scale.port.as_deref().unwrap_or("Select Port")
        )?;
        writeln!(f, "Scale baud:       {}", self.scale.baud)?;
        writeln!(f, "Read timeout:     {} ms", self.scale.read_timeout_ms)?;
        writeln!(
            f,
            "PDF folder:       {}",
            self.output
                .pdf_folder
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        write!(
            f,
            "Label:            {} x {} in @ {} dpi",
            self.label.width_in, self.label.height_in, self.label.dpi
        )
    }
}
