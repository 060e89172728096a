//! Mock adapters for integration tests.
//!
//! `MockPanel` records every panel call and the resulting line levels so
//! tests can assert on both the final picture and the write history.
//! `SharedPin` is an `OutputPin` whose level stays observable after the
//! pin has been moved into a driver.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use doorctl::app::events::AppEvent;
use doorctl::app::ports::{EventSink, OutputLine, PanelPort};
use embedded_hal::digital::{ErrorType, OutputPin};

// ── Panel call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCall {
    SetLine { line: OutputLine, high: bool },
    MotionBlink(bool),
}

// ── MockPanel ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockPanel {
    pub calls: Vec<PanelCall>,
    /// Line levels captured each time the red LEDs were taken back.
    pub releases: Vec<[bool; 6]>,
    levels: [bool; 6],
    blink_owned: bool,
}

#[allow(dead_code)]
impl MockPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self, line: OutputLine) -> bool {
        self.levels[line as usize]
    }

    /// Level of `line` at the most recent blink release.
    pub fn level_at_release(&self, line: OutputLine) -> Option<bool> {
        self.releases.last().map(|levels| levels[line as usize])
    }

    pub fn blink_owned(&self) -> bool {
        self.blink_owned
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl PanelPort for MockPanel {
    fn set_line(&mut self, line: OutputLine, high: bool) {
        if matches!(line, OutputLine::RedLed | OutputLine::RedLed2) {
            assert!(!self.blink_owned, "control loop wrote {line:?} while the blink generator owns it");
        }
        self.levels[line as usize] = high;
        assert!(
            !(self.level(OutputLine::BridgeA) && self.level(OutputLine::BridgeB)),
            "bridge A and B active together"
        );
        self.calls.push(PanelCall::SetLine { line, high });
    }

    fn set_motion_blink(&mut self, enabled: bool) {
        self.blink_owned = enabled;
        if !enabled {
            self.levels[OutputLine::RedLed as usize] = false;
            self.levels[OutputLine::RedLed2 as usize] = false;
            self.releases.push(self.levels);
        }
        self.calls.push(PanelCall::MotionBlink(enabled));
    }
}

// ── CollectingSink ────────────────────────────────────────────

#[derive(Default)]
pub struct CollectingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::StateChanged { .. }))
            .count()
    }
}

impl EventSink for CollectingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── SharedPin ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct SharedPin(Arc<Mutex<bool>>);

impl SharedPin {
    pub fn is_high(&self) -> bool {
        *self.0.lock().unwrap()
    }
}

impl ErrorType for SharedPin {
    type Error = Infallible;
}

impl OutputPin for SharedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        *self.0.lock().unwrap() = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        *self.0.lock().unwrap() = true;
        Ok(())
    }
}
