//! Error types for switchyard-mux

use switchyard_core::ComponentIndex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MuxError {
    #[error(transparent)]
    Core(#[from] switchyard_core::Error),

    #[error("Adapter {index} failed: {reason}")]
    Adapter {
        index: ComponentIndex,
        reason: anyhow::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl MuxError {
    pub(crate) fn adapter(index: ComponentIndex, reason: anyhow::Error) -> Self {
        MuxError::Adapter { index, reason }
    }

    /// Component index of an adapter failure, if this is one
    pub fn failed_component(&self) -> Option<ComponentIndex> {
        match self {
            MuxError::Adapter { index, .. } => Some(*index),
            _ => None,
        }
    }
}
