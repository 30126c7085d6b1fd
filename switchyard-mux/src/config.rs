//! Configuration for switchyard-mux

use serde::{Deserialize, Serialize};

/// Mux configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MuxConfig {
    /// Pause between observation sweeps when blocking on an all-tau fleet,
    /// in milliseconds
    pub poll_interval_ms: u64,
    /// Capacity of the event broadcast channel
    pub event_channel_capacity: usize,
}

impl Default for MuxConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 50,
            event_channel_capacity: 1024,
        }
    }
}

impl MuxConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval_ms == 0 {
            return Err("Poll interval must be greater than 0".to_string());
        }
        if self.event_channel_capacity == 0 {
            return Err("Event channel capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}
