//! Blink signal generator for the in-motion indicators.
//!
//! A periodic timer (see [`hw_timer`](super::hw_timer)) calls
//! [`BlinkGenerator::on_timer`] every 50 ms. Each call toggles the shared
//! blink flag exactly once and, while the generator is armed, writes the
//! new level straight to both red LEDs.
//!
//! ```text
//!  esp_timer task (50 ms)            control loop (500 ms)
//!  ──────────────────────            ─────────────────────
//!  on_timer()                        PanelPort::set_motion_blink(true)  → arm()
//!    └─ critical section             PanelPort::set_motion_blink(false) → reclaim()
//!         flag ^= 1                      └─ critical section
//!         if armed: red, red2 = flag          disarm, red = red2 = low
//! ```
//!
//! Both sides take the same critical section around the red pins, so once
//! `reclaim()` returns no late timer fire can light a red LED again.
//!
//! At rest the generator keeps toggling the flag but writes no pin; the red
//! LEDs belong to the control loop until the next `arm()`.

use core::cell::RefCell;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_hal::digital::OutputPin;
use log::warn;

// ───────────────────────────────────────────────────────────────
// BlinkSignal — the atomic flag shared by both contexts
// ───────────────────────────────────────────────────────────────

/// Blink flag, arm gate, and fire counter.
#[derive(Debug, Default)]
pub struct BlinkSignal {
    flag: AtomicBool,
    armed: AtomicBool,
    fires: AtomicU32,
}

impl BlinkSignal {
    pub const fn new() -> Self {
        Self {
            flag: AtomicBool::new(false),
            armed: AtomicBool::new(false),
            fires: AtomicU32::new(0),
        }
    }

    /// Toggle the flag. Returns the new level if the indicators should
    /// show it (armed), `None` otherwise.
    pub fn fire(&self) -> Option<bool> {
        let level = !self.flag.fetch_xor(true, Ordering::AcqRel);
        self.fires.fetch_add(1, Ordering::Relaxed);
        self.armed.load(Ordering::Acquire).then_some(level)
    }

    /// Current value of the blink flag.
    pub fn level(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Whether the red LEDs currently belong to the generator.
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Timer fires since boot (wraps).
    pub fn fire_count(&self) -> u32 {
        self.fires.load(Ordering::Relaxed)
    }

    fn set_armed(&self, armed: bool) {
        self.armed.store(armed, Ordering::Release);
    }
}

// ───────────────────────────────────────────────────────────────
// MotionIndicators — the two red LEDs
// ───────────────────────────────────────────────────────────────

/// Primary and secondary red LED outputs.
pub struct MotionIndicators<P> {
    red: P,
    red_2: P,
}

impl<P: OutputPin> MotionIndicators<P> {
    pub fn new(red: P, red_2: P) -> Self {
        Self { red, red_2 }
    }

    /// Drive both red LEDs to `level`.
    pub fn set(&mut self, level: bool) {
        self.set_red(level);
        self.set_red_2(level);
    }

    pub fn set_red(&mut self, level: bool) {
        write_pin(&mut self.red, level, "red");
    }

    pub fn set_red_2(&mut self, level: bool) {
        write_pin(&mut self.red_2, level, "red_2");
    }
}

fn write_pin<P: OutputPin>(pin: &mut P, level: bool, name: &str) {
    let result = if level { pin.set_high() } else { pin.set_low() };
    if let Err(e) = result {
        warn!("blink: {} LED write failed: {:?}", name, e);
    }
}

// ───────────────────────────────────────────────────────────────
// BlinkGenerator — timer-side producer
// ───────────────────────────────────────────────────────────────

/// Owns the blink signal and the red LEDs behind a critical-section mutex.
///
/// Shared (via `Arc`) between the timer callback and the hardware adapter.
pub struct BlinkGenerator<P> {
    signal: BlinkSignal,
    indicators: Mutex<CriticalSectionRawMutex, RefCell<MotionIndicators<P>>>,
}

impl<P: OutputPin> BlinkGenerator<P> {
    pub fn new(indicators: MotionIndicators<P>) -> Self {
        Self {
            signal: BlinkSignal::new(),
            indicators: Mutex::new(RefCell::new(indicators)),
        }
    }

    /// The blink flag, for readers in the control loop.
    pub fn signal(&self) -> &BlinkSignal {
        &self.signal
    }

    /// Timer entry point: toggle once, write the LEDs if armed.
    /// Returns the level written, if any.
    pub fn on_timer(&self) -> Option<bool> {
        self.indicators.lock(|cell| {
            let level = self.signal.fire()?;
            cell.borrow_mut().set(level);
            Some(level)
        })
    }

    /// Hand the red LEDs to the generator.
    pub fn arm(&self) {
        self.indicators.lock(|_| self.signal.set_armed(true));
    }

    /// Take the red LEDs back and force both low in the same critical
    /// section.
    pub fn reclaim(&self) {
        self.indicators.lock(|cell| {
            self.signal.set_armed(false);
            cell.borrow_mut().set(false);
        });
    }

    /// Control-loop write to a single red LED. Ignored while armed.
    pub fn set_red(&self, primary: bool, level: bool) {
        self.indicators.lock(|cell| {
            if self.signal.is_armed() {
                return;
            }
            let mut leds = cell.borrow_mut();
            if primary {
                leds.set_red(level);
            } else {
                leds.set_red_2(level);
            }
        });
    }
}
