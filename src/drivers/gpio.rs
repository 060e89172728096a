//! Push-pull GPIO output line.
//!
//! On the device each line is configured through `gpio_config` and written
//! with `gpio_set_level`. On the host the level is kept in memory so the
//! same adapter code can be driven from tests.

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::error::GpioError;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// One configured output pin. Starts low.
#[derive(Debug)]
pub struct GpioLine {
    pin: i32,
    level: bool,
}

impl GpioLine {
    /// Configure `pin` as a plain output and drive it low.
    #[cfg(target_os = "espidf")]
    pub fn output(pin: i32) -> Result<Self, GpioError> {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: cfg is a fully initialised config for a single pin; called
        // once per pin from the main task during boot.
        let rc = unsafe { gpio_config(&cfg) };
        if rc != ESP_OK as i32 {
            return Err(GpioError::ConfigFailed { pin, rc });
        }
        let mut line = Self { pin, level: true };
        line.write(false)?;
        Ok(line)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn output(pin: i32) -> Result<Self, GpioError> {
        Ok(Self { pin, level: false })
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }

    /// Last level written.
    pub fn level(&self) -> bool {
        self.level
    }

    #[cfg(target_os = "espidf")]
    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        // SAFETY: the pin was configured as an output in `output()`.
        let rc = unsafe { gpio_set_level(self.pin, u32::from(high)) };
        if rc != ESP_OK as i32 {
            return Err(GpioError::WriteFailed { pin: self.pin, rc });
        }
        self.level = high;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        self.level = high;
        Ok(())
    }
}

impl ErrorType for GpioLine {
    type Error = GpioError;
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(true)
    }
}
