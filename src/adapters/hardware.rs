//! Hardware adapter — bridges the output pins to the [`PanelPort`] trait.
//!
//! Owns the two green LEDs and both H-bridge inputs directly. The red LEDs
//! are shared with the blink timer through [`BlinkGenerator`], so every red
//! write (and the arm / reclaim hand-over) goes through its critical
//! section. This is the only module that writes output pins from the
//! control loop.

use std::sync::Arc;

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::ports::{OutputLine, PanelPort};
use crate::drivers::blink::BlinkGenerator;

/// Concrete adapter driving the six panel lines.
pub struct HardwareAdapter<P> {
    green: P,
    green_2: P,
    bridge_a: P,
    bridge_b: P,
    blink: Arc<BlinkGenerator<P>>,
}

impl<P: OutputPin> HardwareAdapter<P> {
    pub fn new(green: P, green_2: P, bridge_a: P, bridge_b: P, blink: Arc<BlinkGenerator<P>>) -> Self {
        Self {
            green,
            green_2,
            bridge_a,
            bridge_b,
            blink,
        }
    }
}

fn write<P: OutputPin>(pin: &mut P, high: bool, line: OutputLine) {
    let result = if high { pin.set_high() } else { pin.set_low() };
    if let Err(e) = result {
        warn!("hardware: {:?} write failed: {:?}", line, e);
    }
}

// ── PanelPort implementation ──────────────────────────────────

impl<P: OutputPin> PanelPort for HardwareAdapter<P> {
    fn set_line(&mut self, line: OutputLine, high: bool) {
        match line {
            OutputLine::RedLed => self.blink.set_red(true, high),
            OutputLine::RedLed2 => self.blink.set_red(false, high),
            OutputLine::GreenLed => write(&mut self.green, high, line),
            OutputLine::GreenLed2 => write(&mut self.green_2, high, line),
            OutputLine::BridgeA => write(&mut self.bridge_a, high, line),
            OutputLine::BridgeB => write(&mut self.bridge_b, high, line),
        }
    }

    fn set_motion_blink(&mut self, enabled: bool) {
        if enabled {
            self.blink.arm();
        } else {
            self.blink.reclaim();
        }
    }
}
