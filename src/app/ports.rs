//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DoorController (domain)
//! ```
//!
//! Driven adapters (output panel, event sinks, clocks) implement these
//! traits. The [`DoorController`](super::service::DoorController) consumes
//! them via generics, so the domain core never touches hardware directly.

// ───────────────────────────────────────────────────────────────
// Panel port (driven adapter: domain → LEDs + H-bridge)
// ───────────────────────────────────────────────────────────────

/// One physical output line on the controller board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputLine {
    RedLed,
    GreenLed,
    RedLed2,
    GreenLed2,
    BridgeA,
    BridgeB,
}

impl OutputLine {
    pub const ALL: [Self; 6] = [
        Self::RedLed,
        Self::GreenLed,
        Self::RedLed2,
        Self::GreenLed2,
        Self::BridgeA,
        Self::BridgeB,
    ];
}

/// Write-side port: the domain calls this to drive the panel.
pub trait PanelPort {
    /// Drive a single line high (`true`) or low.
    fn set_line(&mut self, line: OutputLine, high: bool);

    /// Hand the two red LEDs to the blink generator (`true`), or take
    /// them back with both lines forced low (`false`). The hand-back must
    /// be atomic with respect to the generator.
    fn set_motion_blink(&mut self, enabled: bool);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → console / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: monotonic time source)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock read once per control-loop pass.
pub trait ClockPort {
    fn now_ms(&self) -> u64;
}
