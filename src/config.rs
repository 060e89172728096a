//! System configuration parameters
//!
//! All tunable timing parameters for the door controller. The defaults
//! reproduce the behaviour of the deployed board; there is no persistent
//! store, so a change means a rebuild.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorConfig {
    // --- Motion ---
    /// Simulated full-travel time (milliseconds). Motion completes on the
    /// first pass where the elapsed time is strictly greater than this.
    pub motion_duration_ms: u64,

    // --- Timing ---
    /// Blink signal generator period (milliseconds)
    pub blink_period_ms: u32,
    /// Delay between control loop passes (milliseconds)
    pub control_loop_interval_ms: u32,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            motion_duration_ms: 5000,
            blink_period_ms: 50,           // 20 Hz toggle
            control_loop_interval_ms: 500, // 2 Hz status
        }
    }
}

impl DoorConfig {
    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.motion_duration_ms == 0 {
            return Err(Error::Config("motion_duration_ms must be non-zero"));
        }
        if self.blink_period_ms == 0 {
            return Err(Error::Config("blink_period_ms must be non-zero"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(Error::Config("control_loop_interval_ms must be non-zero"));
        }
        if self.blink_period_ms >= self.control_loop_interval_ms {
            return Err(Error::Config(
                "blink_period_ms must be shorter than control_loop_interval_ms",
            ));
        }
        if u64::from(self.control_loop_interval_ms) >= self.motion_duration_ms {
            return Err(Error::Config(
                "control_loop_interval_ms must be shorter than motion_duration_ms",
            ));
        }
        Ok(())
    }
}
