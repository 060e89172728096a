//! Unified error types for the door controller firmware.
//!
//! A single `Error` enum that every subsystem converts into. All variants
//! are `Copy` so they pass through the init path without allocation; the
//! binary wraps them in `anyhow` with context.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// A GPIO call returned an ESP-IDF error code.
    Gpio(GpioError),
    /// The periodic blink timer could not be created or started.
    Timer(i32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Gpio(e) => write!(f, "gpio: {e}"),
            Self::Timer(rc) => write!(f, "timer: esp_timer call failed (rc={rc})"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// GPIO errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioError {
    /// `gpio_config` rejected the pin.
    ConfigFailed { pin: i32, rc: i32 },
    /// `gpio_set_level` failed.
    WriteFailed { pin: i32, rc: i32 },
}

impl fmt::Display for GpioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigFailed { pin, rc } => write!(f, "GPIO{pin} config failed (rc={rc})"),
            Self::WriteFailed { pin, rc } => write!(f, "GPIO{pin} write failed (rc={rc})"),
        }
    }
}

impl core::error::Error for GpioError {}

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

impl From<GpioError> for Error {
    fn from(e: GpioError) -> Self {
        Self::Gpio(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
