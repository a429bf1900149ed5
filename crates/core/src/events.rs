//! Events published by the session to its observers.

use std::path::PathBuf;

use serde::Serialize;

use crate::fields::{Field, Flag};
use crate::output::Delivery;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational; the operator may simply carry on.
    Info,
    /// An action failed and should be retried by the operator.
    Error,
}

/// A change or notification emitted by [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A new dataset replaced the previous one.
    DatasetLoaded {
        /// Source file.
        path: PathBuf,
        /// Number of data rows.
        rows: usize,
    },
    /// A lookup overwrote the dependent fields.
    FieldsPopulated {
        /// The SO number that matched.
        so_number: String,
    },
    /// One text field was edited.
    FieldChanged {
        /// Which field.
        field: Field,
        /// Its new value.
        value: String,
    },
    /// A flag was toggled.
    FlagChanged {
        /// Which flag.
        flag: Flag,
        /// Its new value.
        enabled: bool,
    },
    /// A scale port was selected.
    PortSelected {
        /// The port identifier.
        port: String,
    },
    /// The scale produced a weight, now stored in the weight field.
    WeightRead {
        /// The weight in display form.
        weight: String,
    },
    /// A label was delivered.
    LabelDelivered {
        /// Where it went.
        delivery: Delivery,
    },
    /// A message for the operator.
    Notice {
        /// Presentation level.
        severity: Severity,
        /// Text to show.
        message: String,
    },
}

impl SessionEvent {
    /// Build an informational notice.
    pub fn info(message: impl Into<String>) -> Self {
        SessionEvent::Notice {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// Build an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        SessionEvent::Notice {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}
