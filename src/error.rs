//! Error handling

use thiserror::Error;

use crate::alert::AlertId;
use crate::timer::TimerId;

#[derive(Error, Debug)]
pub enum ViewError {
    /// Alert list could not be decoded
    #[error("Invalid alert list: {0}")]
    InvalidAlerts(#[source] serde_json::Error),

    /// Configuration document could not be decoded
    #[error("Invalid map configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    #[error("Unknown alert {0}")]
    UnknownAlert(AlertId),

    #[error("Unknown timer {0}")]
    UnknownTimer(TimerId),

    #[error("Map view is already set up")]
    AlreadySetUp,

    /// Host called an entry point before `alert_map_init`
    #[error("Map view is not initialized")]
    NotInitialized,
}

impl ViewError {
    /// Status code handed back across the wasm boundary.
    pub fn code(&self) -> i32 {
        match self {
            ViewError::InvalidAlerts(_) => -1,
            ViewError::InvalidConfig(_) => -2,
            ViewError::UnknownAlert(_) => -3,
            ViewError::UnknownTimer(_) => -4,
            ViewError::AlreadySetUp => -5,
            ViewError::NotInitialized => -6,
        }
    }
}
