use std::io;

use pifm_core::ParameterError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PifmError>;

#[derive(Debug, Error)]
pub enum PifmError {
    /// The register device could not be opened (usually not running as root)
    #[error("can't open {path}: {source}")]
    DeviceAccess { path: String, source: io::Error },

    /// The kernel refused to map the requested physical range
    #[error("can't map {len:#x} bytes of physical memory at {offset:#010x}: {source}")]
    Mapping {
        offset: u64,
        len: usize,
        source: io::Error,
    },

    #[error("can't open audio source {path}: {source}")]
    AudioSource { path: String, source: io::Error },

    #[error("{name} must be a number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error("can't install termination handler: {0}")]
    SignalHandler(String),
}
